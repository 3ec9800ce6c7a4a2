use chain_hash::HashTable;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Number of entries to insert
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    /// Initial bucket count
    #[arg(short = 'b', long = "buckets", default_value_t = 16)]
    buckets: usize,

    /// Remove every other entry after filling the table
    #[arg(long)]
    erase_half: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("Creating HashTable with {} initial buckets", args.buckets);

    let mut table: HashTable<u64, u64> = HashTable::with_capacity(args.buckets);

    println!("Actual capacity: {}", table.capacity());
    println!("Filling table with {} u64 entries...", args.entries);

    for key in 0..args.entries {
        if !table.insert(key, key.wrapping_mul(31)) {
            panic!("Key already exists in table: {}", key);
        }
    }

    if args.erase_half {
        let erased = (0..args.entries).step_by(2).filter(|k| table.erase(k)).count();
        println!("Erased {} entries", erased);
    }

    println!("Table holds {} entries in {} buckets", table.len(), table.capacity());
    println!("Final load factor: {:.2}%", table.load_factor() * 100.0);

    table.chain_histogram().print();
    table.bucket_stats().print();
}
