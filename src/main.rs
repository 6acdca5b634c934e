use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::debug;

use pagefile::common::{report, PageData, PageNum, Result, PAGE_SIZE};
use pagefile::storage::disk::StorageManager;

#[derive(Parser, Debug)]
#[command(
    name = "pagefile",
    version,
    about = "Inspect and edit fixed-size page files",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create a page file holding one zeroed page
    Create { path: PathBuf },
    /// Show page count and cursor of a page file
    Info { path: PathBuf },
    /// Hex dump a page
    Read {
        path: PathBuf,
        page: PageNum,
        /// Number of bytes to dump
        #[arg(long, default_value_t = 256)]
        limit: usize,
    },
    /// Overwrite an existing page
    Write {
        path: PathBuf,
        page: PageNum,
        /// Fill the whole page with this byte
        #[arg(long, conflicts_with = "text")]
        fill: Option<u8>,
        /// Write this text at the start of the page, zeroing the rest
        #[arg(long)]
        text: Option<String>,
    },
    /// Append zeroed pages
    Append {
        path: PathBuf,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Grow a page file to at least this many pages
    Ensure { path: PathBuf, pages: PageNum },
    /// Remove a page file
    Destroy { path: PathBuf },
}

fn init_logger() {
    // Level comes from RUST_LOG, info by default
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    let mut sm = StorageManager::new();
    sm.initialize();

    if let Err(e) = run(&sm, cli.cmd) {
        debug!("command failed: {:?}", e);
        report::print_error(&e);
        std::process::exit(1);
    }
}

fn run(sm: &StorageManager, cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::Create { path } => {
            sm.create_page_file(&path)?;
            println!("Created {} (1 page)", path.display());
        }
        Cmd::Info { path } => {
            let mut handle = sm.open_page_file(&path)?;
            println!("File:       {}", handle.file_name());
            println!("Page size:  {} bytes", PAGE_SIZE);
            println!("Pages:      {}", handle.total_pages());
            println!("Cursor:     {}", handle.cursor());
            sm.close_page_file(&mut handle)?;
        }
        Cmd::Read { path, page, limit } => {
            let mut handle = sm.open_page_file(&path)?;
            let mut data: PageData = [0u8; PAGE_SIZE];
            handle.read_block(page, &mut data)?;
            println!("Page {} of {}:", page, handle.file_name());
            print!("{}", hex_dump(&data[..limit.min(PAGE_SIZE)]));
            sm.close_page_file(&mut handle)?;
        }
        Cmd::Write {
            path,
            page,
            fill,
            text,
        } => {
            let mut data: PageData = [fill.unwrap_or(0); PAGE_SIZE];
            if let Some(text) = text {
                let bytes = text.as_bytes();
                let len = bytes.len().min(PAGE_SIZE);
                data[..len].copy_from_slice(&bytes[..len]);
            }

            let mut handle = sm.open_page_file(&path)?;
            handle.write_block(page, &data)?;
            println!("Wrote page {} of {}", page, handle.file_name());
            sm.close_page_file(&mut handle)?;
        }
        Cmd::Append { path, count } => {
            let mut handle = sm.open_page_file(&path)?;
            for _ in 0..count {
                handle.append_empty_block()?;
            }
            println!(
                "Appended {} page(s), {} now holds {} pages",
                count,
                handle.file_name(),
                handle.total_pages()
            );
            sm.close_page_file(&mut handle)?;
        }
        Cmd::Ensure { path, pages } => {
            let mut handle = sm.open_page_file(&path)?;
            handle.ensure_capacity(pages)?;
            println!("{} holds {} pages", handle.file_name(), handle.total_pages());
            sm.close_page_file(&mut handle)?;
        }
        Cmd::Destroy { path } => {
            sm.destroy_page_file(&path)?;
            println!("Destroyed {}", path.display());
        }
    }
    Ok(())
}

/// Renders bytes as offset-prefixed rows of 16 hex bytes plus their printable ASCII.
fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        out.push_str(&format!("{:08x}  {:<47}  |{}|\n", row * 16, hex.join(" "), ascii));
    }
    out
}
