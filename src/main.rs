use hearth::config::Config;
use hearth::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let (host, port) = cfg.host_port()?;

    let mut server = Server::with_config(&cfg);

    server.handle_func("/hello", |_req, res| {
        res.set_status(200, "OK");
        res.set_header("Content-Type", "text/html");
        res.write_body(
            b"<html><body><h2>hello from hearth</h2></body><script src=\"static/temp.js\"></script></html>",
        )?;
        Ok(())
    });

    server.handle_func("/move", |_req, res| {
        res.set_status(301, "Moved Permanently");
        res.set_header("Location", "http://www.google.com");
        Ok(())
    });

    tokio::select! {
        res = server.listen(host, port) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
