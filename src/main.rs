fn main() -> anyhow::Result<()> {
    prizewheel_lib::run()
}
