use actix_web::{web, App, HttpServer};

/// Starts an in-process API on an ephemeral port and returns its base URL
/// (including the `/api` prefix). The server lives as long as the test system.
pub async fn spawn_api<F>(configure: F) -> String
where
  F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
  let server =
    HttpServer::new(move || App::new().configure(configure.clone()))
      .workers(1)
      .bind(("127.0.0.1", 0))
      .expect("Failed to bind mock API");

  let address = server.addrs()[0];
  actix_web::rt::spawn(server.run());

  format!("http://{}/api", address)
}
