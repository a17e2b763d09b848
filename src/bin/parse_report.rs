use anyhow::Result;
use zipf::ParsedFile;

/// Takes word-count files and reports how many lines parse, without plotting anything
fn main() -> Result<()> {
    env_logger::init();
    let (mut total_records, mut total_skipped) = (0, 0);
    for path in std::env::args().skip(1) {
        let parsed = ParsedFile::read(&path)?;
        println!("{}: {} records. {} lines skipped.", path, parsed.records.len(), parsed.errors.len());
        for error in parsed.errors.iter().take(10) {
            println!("  {}", error);
        }
        if parsed.errors.len() > 10 {
            println!("  ... and {} more", parsed.errors.len() - 10);
        }
        // The plot reads rank off the line order, so it only means something for sorted input
        let out_of_order = parsed.records.windows(2).filter(|pair| pair[0].count < pair[1].count).count();
        if out_of_order > 0 {
            println!("  warning: {} records have a higher count than the one before them", out_of_order);
        }
        total_records += parsed.records.len();
        total_skipped += parsed.errors.len();
    }
    println!("Total records: {}. Total lines skipped: {}.", total_records, total_skipped);

    Ok(())
}
