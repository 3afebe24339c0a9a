fn main() -> anyhow::Result<()> {
    groups_service_lib::run()
}
