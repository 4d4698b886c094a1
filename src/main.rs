mod app;
mod config;
mod runtime;
mod stats;
mod store;
mod ui;

#[cfg(test)]
mod testenv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
