//! Shared test fixtures: loopback HTTP server, image bytes, zip bytes

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A loopback HTTP server serving a fixed set of routes
///
/// Unknown paths answer 404. Every request (matched or not) bumps `hits`.
pub struct FixtureServer {
    /// Base URL, no trailing slash
    pub url: String,
    /// Total requests received
    pub hits: Arc<AtomicUsize>,
}

impl FixtureServer {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawn a fixture server on an ephemeral port
///
/// The server thread runs until the test process exits.
pub fn serve(routes: Vec<(String, Vec<u8>)>) -> FixtureServer {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fixture server");
    let addr = server
        .server_addr()
        .to_ip()
        .expect("fixture server has an IP address");
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            counter.fetch_add(1, Ordering::SeqCst);
            let body = routes
                .iter()
                .find(|(path, _)| request.url() == path)
                .map(|(_, data)| data.clone());
            let response = match body {
                Some(data) => tiny_http::Response::from_data(data),
                None => tiny_http::Response::from_data(b"not found".to_vec()).with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    FixtureServer {
        url: format!("http://{}", addr),
        hits,
    }
}

/// Encode a solid-color PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([120, 90, 60, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode fixture png");
    buf.into_inner()
}

/// Build an in-memory zip archive from (name, contents) entries
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, contents) in entries {
        writer
            .start_file(name.to_string(), options)
            .expect("start zip entry");
        writer.write_all(contents).expect("write zip entry");
    }
    writer.finish().expect("finish fixture zip").into_inner()
}
