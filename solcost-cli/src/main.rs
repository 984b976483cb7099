//! Solcost binary entry point.

fn main() -> anyhow::Result<()> {
    solcost_cli::run()
}
