use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Canned 200 response carrying a 64-byte fake image body.
pub const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n0123456789012345678901234567890123456789012345678901234567890123";

/// Canned 404 response; every fetch against it must count as a failure.
pub const NOT_FOUND_RESPONSE: &[u8] =
    b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found";

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests that answers every request with
/// `response`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(response: &'static [u8]) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, response));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/wms", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, response: &[u8]) {
    let mut buffer = [0u8; 2048];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Write a tile-mode config pointing at `url` into `dir`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_config(
    dir: &Path,
    url: &str,
    requests: u64,
    workers: u64,
) -> Result<PathBuf, String> {
    let config = format!(
        r#"
requests = {requests}
workers = {workers}
timeout = 10
output = "report"

[service]
url = "{url}"
layers = "a_map_layer"

[tiles]
min_level = 11
max_level = 18

[[bounding_box]]
name = "Sydney"
min_x = 16796997.0
min_y = -4020748.0
max_x = 16835959.0
max_y = -3995282.0
"#
    );
    let path = dir.join("load.toml");
    std::fs::write(&path, config).map_err(|err| format!("write config failed: {}", err))?;
    Ok(path)
}

/// Run the `wmsload` binary inside `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_wmsload<I, S>(args: I, dir: &Path) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_wmsload"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run wmsload failed: {}", err))
}

/// Find the timestamped report CSV written into `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or no report exists.
pub fn find_report(dir: &Path) -> Result<PathBuf, String> {
    let entries = std::fs::read_dir(dir).map_err(|err| format!("read_dir failed: {}", err))?;
    for entry in entries {
        let entry = entry.map_err(|err| format!("read_dir entry failed: {}", err))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("report_") && name.ends_with(".csv") {
            return Ok(entry.path());
        }
    }
    Err("no report_*.csv found".to_owned())
}
