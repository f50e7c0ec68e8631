use clap::Args;
use gapshield_core::{Config, SeedKey};

const KEY_BYTES: usize = 32;

#[derive(Args)]
pub struct KeygenArgs {
    /// Store the key as privacy_gaps.seed_key instead of printing it
    #[arg(long, conflicts_with = "clear")]
    save: bool,
    /// Remove the stored seed key and fall back to unkeyed seeding
    #[arg(long)]
    clear: bool,
}

pub fn run(args: KeygenArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.clear {
        let mut config = Config::load()?;
        config.set("privacy_gaps.seed_key", "")?;
        config.save()?;
        println!("seed key cleared");
        return Ok(());
    }

    let mut bytes = [0u8; KEY_BYTES];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| format!("Failed to generate random key: {e}"))?;
    let key = SeedKey::from_bytes(bytes.to_vec())?;

    if args.save {
        let mut config = Config::load()?;
        config.set("privacy_gaps.seed_key", &key.to_hex())?;
        config.save()?;
        println!("seed key saved; every child's schedule has changed");
    } else {
        println!("{}", key.to_hex());
    }
    Ok(())
}
