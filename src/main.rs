use icup_maintenance::clear;
use icup_maintenance::config::Config;
use icup_maintenance::db::DynamoDbStore;
use icup_maintenance::logging;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logging::init_logging();

    println!("🗑️  Clearing International Cup Pairing System Data");
    println!("{}", "=".repeat(50));

    let config = Config::pairing_system();
    let store = DynamoDbStore::connect(&config).await;
    let summary = clear::clear_all(&store, &config.tables).await;

    println!("\n{}", "=".repeat(50));
    println!(
        "✅ All pairing data cleared! Total items deleted: {}",
        summary.total_deleted()
    );
    println!("\nNext steps:");
    println!("1. Refresh the admin panel");
    println!("2. Click 'Initialize Empty Pairings' to recreate the structure");
    println!("3. Add your players and set up fresh pairings");
    println!();
}
