use cornell::app::App;
use cornell::settings::ViewerSettings;

fn main() -> cornell::errors::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new(ViewerSettings::default()).run()
}
