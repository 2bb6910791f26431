fn main() -> anyhow::Result<()> {
    parsel::run()
}
