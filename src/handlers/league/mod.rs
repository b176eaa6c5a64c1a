pub mod standings_handler;
