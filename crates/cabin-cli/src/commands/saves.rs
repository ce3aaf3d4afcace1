//! List save slots.

use cabin_engine::{EngineConfig, SaveManager};

pub fn run(config: &EngineConfig) -> Result<(), String> {
    let saves = SaveManager::new(&config.save_directory).list_saves();
    if saves.is_empty() {
        println!("No saved games.");
        return Ok(());
    }
    for slot in saves {
        println!("{slot}");
    }
    Ok(())
}
