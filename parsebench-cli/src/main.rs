fn main() -> anyhow::Result<()> {
    parsebench_cli::run()
}
