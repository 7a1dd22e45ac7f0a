//! Subcommand implementations.

use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::path::Path;

use httpfs::{ConfigError, FsError, HttpFs, HttpFsConfig, NodeTable, Truncated};
use httpfs_http::{Error as FetchError, FetchTarget, Fetcher, StaticResolver, TcpConnector};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_response_size: Option<usize>,
}

pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<HttpFsConfig, CliError> {
    let mut config = match path {
        Some(path) => HttpFsConfig::load(path)?,
        None => HttpFsConfig::default(),
    };

    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.timeout_secs = timeout;
    }
    if let Some(user_agent) = overrides.user_agent {
        config.user_agent = user_agent;
    }
    if let Some(size) = overrides.max_response_size {
        config.max_response_size = size;
    }

    Ok(config)
}

pub fn cat<W: Write>(
    config: &HttpFsConfig,
    connect_to: Option<Ipv4Addr>,
    path: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let mut nodes = NodeTable::with_limits(config.path_limits());

    let (body, truncated) = match connect_to {
        Some(addr) => pinned_fs(config, addr).read_path(&mut nodes, path)?,
        None => HttpFs::from_config(config).read_path(&mut nodes, path)?,
    };
    report_truncation(truncated);

    out.write_all(&body)?;
    out.flush()?;
    Ok(())
}

pub fn head<W: Write>(
    config: &HttpFsConfig,
    connect_to: Option<Ipv4Addr>,
    path: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let path = path.trim_start_matches('/');
    let (response, truncated) = match connect_to {
        Some(addr) => pinned_fetcher(config, addr).get(path)?,
        None => Fetcher::new(config.fetch_config()).get(path)?,
    };
    report_truncation(truncated);

    let status = match response.status {
        Some(status) => status.to_string(),
        None => "(no status line)".to_string(),
    };
    writeln!(
        out,
        "{} {}",
        response.version.as_deref().unwrap_or("HTTP/?"),
        status
    )?;
    for (name, value) in &response.headers {
        writeln!(out, "{}: {}", name, String::from_utf8_lossy(value.as_bytes()))?;
    }
    writeln!(out, "({} body bytes)", response.body.len())?;
    Ok(())
}

pub fn resolve<W: Write>(config: &HttpFsConfig, path: &str, out: &mut W) -> Result<(), CliError> {
    let target = FetchTarget::split(path.trim_start_matches('/'))?;
    let request = target.request_head(&config.user_agent)?;

    writeln!(out, "host: {}", target.host())?;
    writeln!(out, "port: {}", config.port)?;
    writeln!(out, "path: {}", target.path())?;
    writeln!(out)?;
    out.write_all(request.as_bytes())?;
    Ok(())
}

fn pinned_fetcher(config: &HttpFsConfig, addr: Ipv4Addr) -> Fetcher<StaticResolver, TcpConnector> {
    Fetcher::with_parts(
        StaticResolver::new(addr),
        TcpConnector,
        config.fetch_config(),
    )
}

fn pinned_fs(config: &HttpFsConfig, addr: Ipv4Addr) -> HttpFs<Fetcher<StaticResolver, TcpConnector>> {
    HttpFs::with_fetcher(pinned_fetcher(config, addr))
}

fn report_truncation(truncated: Option<Truncated>) {
    if let Some(notice) = truncated {
        eprintln!("httpfs: {}", notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(response: &'static [u8]) -> (u16, thread::JoinHandle<()>) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut byte = [0u8; 1];
            while !request.ends_with(b"\r\n\r\n") && stream.read(&mut byte).unwrap() == 1 {
                request.push(byte[0]);
            }
            stream.write_all(response).unwrap();
        });
        (port, handle)
    }

    #[test]
    fn resolve_prints_request_head() {
        let config = HttpFsConfig::default();
        let mut out = Vec::new();
        resolve(&config, "example.com/a/b", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("host: example.com\nport: 80\npath: /a/b\n\n"));
        assert!(text.ends_with(
            "GET /a/b HTTP/1.0\r\nUser-Agent: httpfs/0.0.1\r\nHost: example.com\r\n\r\n"
        ));
    }

    #[test]
    fn resolve_rejects_bad_host() {
        let config = HttpFsConfig::default();
        let err = resolve(&config, &"h".repeat(300), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Fetch(FetchError::HostTooLong { .. })));
    }

    #[test]
    fn overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("httpfs.json");
        std::fs::write(&file, r#"{ "port": 8080, "user_agent": "from-file" }"#).unwrap();

        let config = load_config(
            Some(&file),
            Overrides {
                port: Some(9090),
                ..Overrides::default()
            },
        )
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.user_agent, "from-file");
    }

    #[test]
    fn cat_writes_body() {
        let (port, peer) = serve_once(b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nHELLO");
        let config = HttpFsConfig {
            port,
            ..HttpFsConfig::default()
        };

        let mut out = Vec::new();
        cat(&config, Some(Ipv4Addr::LOCALHOST), "example.com/hello", &mut out).unwrap();
        assert_eq!(out, b"HELLO");
        peer.join().unwrap();
    }

    #[test]
    fn head_prints_status_and_headers() {
        let (port, peer) =
            serve_once(b"HTTP/1.0 404 Not Found\r\nContent-Type: text/html\r\n\r\nmissing");
        let config = HttpFsConfig {
            port,
            ..HttpFsConfig::default()
        };

        let mut out = Vec::new();
        head(&config, Some(Ipv4Addr::LOCALHOST), "example.com/x", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.0 404 Not Found\n"));
        assert!(text.contains("content-type: text/html\n"));
        assert!(text.ends_with("(7 body bytes)\n"));
        peer.join().unwrap();
    }
}
