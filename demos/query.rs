use msq::{MsqErr, QuerySession, ServerTarget};

// RUST_LOG=msq=trace cargo run --example query -- www.example.com:25565
fn main() -> Result<(), MsqErr> {
    env_logger::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "www.example.com:25565".into());
    let mut session = QuerySession::create(ServerTarget::create_from_str(&addr)?);

    println!("{}", session.query()?);

    for plugin in session.status().plugin_list()? {
        println!("{}", plugin);
    }

    Ok(())
}
