use scene::{App, Config};

fn main() {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let config = Config::default();
    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    };
    app.run();
}
