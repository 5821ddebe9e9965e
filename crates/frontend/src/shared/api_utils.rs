/// Порт REST-сервиса предложений
const API_PORT: u16 = 3000;

/// Полный адрес API: `{protocol}//{hostname}:3000{path}`
///
/// Without a window (tests, workers) the path is returned as is.
pub fn api_url(path: &str) -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return path.to_string();
    };
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}{}", protocol, hostname, API_PORT, path)
}
