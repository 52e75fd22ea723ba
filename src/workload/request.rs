use url::Url;

use crate::config::types::RunConfig;

use super::sampler::MapRequest;

/// Builds the GetMap URL for one sampled window.
///
/// Query parameters are appended in a fixed order so built URLs are
/// deterministic for a given window. The BBOX value is the window extent as
/// `left,bottom,right,top`.
#[must_use]
pub fn build_url(request: &MapRequest, config: &RunConfig) -> Url {
    let mut url = config.service.url.clone();
    let bbox = format!(
        "{},{},{},{}",
        request.extent.left, request.extent.bottom, request.extent.right, request.extent.top
    );
    url.query_pairs_mut()
        .append_pair("SERVICE", "WMS")
        .append_pair("VERSION", &config.service.version)
        .append_pair("REQUEST", "GetMap")
        .append_pair("LAYERS", &config.service.layers)
        .append_pair("STYLES", &config.service.styles)
        .append_pair("FORMAT", &config.service.format)
        .append_pair("SRS", &config.service.srs)
        .append_pair("WIDTH", &request.width_px.to_string())
        .append_pair("HEIGHT", &request.height_px.to_string())
        .append_pair("BBOX", &bbox);
    url
}
