mod support;

use tempfile::tempdir;

use support::{
    NOT_FOUND_RESPONSE, OK_RESPONSE, find_report, run_wmsload, spawn_http_server, write_config,
};

#[test]
fn e2e_successful_run_writes_a_full_report() -> Result<(), String> {
    let (url, _server) = spawn_http_server(OK_RESPONSE)?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    write_config(dir.path(), &url, 20, 4)?;

    let output = run_wmsload(["--config", "load.toml"], dir.path())?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report = find_report(dir.path())?;
    let content =
        std::fs::read_to_string(&report).map_err(|err| format!("read report failed: {}", err))?;
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 12 + 20);
    assert_eq!(lines.first().copied(), Some("WMS load test results"));
    assert_eq!(lines.get(2).copied(), Some("Concurrent workers,4"));
    assert_eq!(lines.get(3).copied(), Some("Map image size,256 x 256,pixels"));
    assert_eq!(lines.get(5).copied(), Some("Map requests,20"));
    assert_eq!(lines.get(7).copied(), Some("Successful requests,20"));
    assert_eq!(lines.get(9).copied(), Some("Failed requests,0"));
    assert_eq!(
        lines.get(11).copied(),
        Some("Time_seconds,Image_bytes,URL")
    );

    for line in lines.iter().skip(12) {
        assert!(
            line.contains(",64,http"),
            "data row should record 64 body bytes: {}",
            line
        );
        assert!(line.contains("REQUEST=GetMap"));
    }
    Ok(())
}

#[test]
fn e2e_failed_fetches_still_produce_a_complete_report() -> Result<(), String> {
    let (url, _server) = spawn_http_server(NOT_FOUND_RESPONSE)?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    write_config(dir.path(), &url, 10, 2)?;

    let output = run_wmsload(["--config", "load.toml"], dir.path())?;
    assert!(
        output.status.success(),
        "failed fetches must not fail the run: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = find_report(dir.path())?;
    let content =
        std::fs::read_to_string(&report).map_err(|err| format!("read report failed: {}", err))?;
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 12 + 10);
    assert_eq!(lines.get(7).copied(), Some("Successful requests,0"));
    assert_eq!(lines.get(8).copied(), Some("Average time,0,seconds"));
    assert_eq!(lines.get(9).copied(), Some("Failed requests,10"));

    for line in lines.iter().skip(12) {
        assert!(
            line.contains(",0,http"),
            "failed row should record zero bytes: {}",
            line
        );
    }
    Ok(())
}

#[test]
fn e2e_dump_urls_prints_sampled_requests_without_fetching() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    // Port 9 (discard) is never listening; --dump-urls must not connect.
    write_config(dir.path(), "http://127.0.0.1:9/wms", 20, 4)?;

    let output = run_wmsload(["--config", "load.toml", "--dump-urls", "5"], dir.path())?;
    assert!(
        output.status.success(),
        "dump-urls failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in &lines {
        assert!(line.starts_with("http://127.0.0.1:9/wms?SERVICE=WMS"));
        assert!(line.contains("REQUEST=GetMap"));
        assert!(line.contains("WIDTH=256"));
        assert!(line.contains("BBOX="));
    }

    assert!(find_report(dir.path()).is_err(), "dump-urls must not write a report");
    Ok(())
}
