use std::ffi;
use std::io::{self, BufRead, Write};

use structopt::StructOpt;

use jewelry_store::config::Config;
use jewelry_store::Result;

mod session;

use session::Session;

#[derive(Debug, StructOpt)]
#[structopt(name = "jewelry-store")]
struct Opt {
    #[structopt(long = "data-dir", default_value = ".", help = "working directory for .dat/.idx files")]
    data_dir: String,

    #[structopt(long = "config", help = "path to a jewelry-store.toml overrides file")]
    config: Option<String>,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let dir: ffi::OsString = opt.data_dir.clone().into();
    let cfg = match &opt.config {
        Some(path) => Config::load_toml(&dir, std::path::Path::new(path)),
        None => Ok(Config::new(&dir)),
    };
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(err) => {
            println!("Error: {}", err);
            return;
        }
    };

    let mut session = Session::new(cfg);
    run_menu(&mut session);
}

fn run_menu(session: &mut Session) {
    let stdin = io::stdin();
    loop {
        print_menu();
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let choice = line.trim();
        if choice == "0" {
            break;
        }

        if let Err(err) = dispatch(session, choice) {
            println!("Error: {}", err);
        }
    }
}

fn print_menu() {
    println!();
    println!("========================================");
    println!("1.  Load CSV");
    println!("2.  Show first records");
    println!("3.  Search product by file index");
    println!("4.  Insert order");
    println!("5.  Remove order");
    println!("6.  Load in-memory indices");
    println!("7.  Search product via B+ tree");
    println!("8.  Search orders-by-product via hash");
    println!("9.  Print index stats");
    println!("10. Analyze collisions (hash)");
    println!("11. Run benchmarks");
    println!("--- COMPRESSION AND ENCRYPTION ---");
    println!("12. Compress file (Huffman)");
    println!("13. Decompress file (Huffman)");
    println!("14. Encrypt file (transposition)");
    println!("15. Decrypt file (transposition)");
    println!("16. Protect file (compress + encrypt)");
    println!("17. Restore protected file");
    println!("18. Verify integrity");
    println!();
    println!("0.  Exit");
    println!("========================================");
}

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok();
    line.trim().to_string()
}

fn dispatch(session: &mut Session, choice: &str) -> Result<()> {
    match choice {
        "1" => action_load_csv(session),
        "2" => action_show_first(session),
        "3" => action_search_file_index(session),
        "4" => action_insert_order(session),
        "5" => action_remove_order(session),
        "6" => action_load_indices(session),
        "7" => action_search_btree(session),
        "8" => action_search_hash(session),
        "9" => action_print_stats(session),
        "10" => action_analyze_collisions(session),
        "11" => action_benchmarks(session),
        "12" => action_huffman(true),
        "13" => action_huffman(false),
        "14" => action_transposition(session, true),
        "15" => action_transposition(session, false),
        "16" => action_protect(session, true),
        "17" => action_protect(session, false),
        "18" => action_verify(),
        other => {
            println!("invalid choice: {}", other);
            Ok(())
        }
    }
}

fn action_load_csv(session: &mut Session) -> Result<()> {
    let csv_path = session.cfg.path(jewelry_store::config::paths::CSV);
    let stats = jewelry_store::loader::load_csv(&csv_path, &session.cfg)?;
    println!(
        "loaded: {} orders, {} products, {} rows skipped",
        stats.orders_written, stats.products_written, stats.rows_skipped
    );
    Ok(())
}

fn action_show_first(session: &mut Session) -> Result<()> {
    let n = prompt("how many records").parse::<usize>().unwrap_or(5);
    for i in 0..n {
        match session.read_order_at((i * jewelry_store::Order::SIZE) as i64) {
            Ok(order) => println!("{:?}", order),
            Err(_) => break,
        }
    }
    Ok(())
}

fn action_search_file_index(session: &mut Session) -> Result<()> {
    let key = prompt("product_id").parse::<i64>().unwrap_or(0);
    let idx = jewelry_store::sparse_index::SparseIndex::load(&session.cfg.path(jewelry_store::config::paths::PRODUCTS_IDX))?;
    match idx.scan_start(key) {
        None => println!("not found"),
        Some(mut offset) => {
            let gap = session.cfg.index_gap as i64;
            let end = offset + gap * jewelry_store::Product::SIZE as i64;
            loop {
                if offset >= end {
                    println!("not found");
                    return Ok(());
                }
                match session.read_product_at(offset) {
                    Ok(p) if p.product_id == key => {
                        println!("{:?}", p);
                        return Ok(());
                    }
                    Ok(p) if p.product_id > key => {
                        println!("not found");
                        return Ok(());
                    }
                    Ok(_) => offset += jewelry_store::Product::SIZE as i64,
                    Err(_) => {
                        println!("not found");
                        return Ok(());
                    }
                }
            }
        }
    }
    Ok(())
}

fn action_insert_order(session: &mut Session) -> Result<()> {
    println!("appending a minimal order to the unsorted tail; rebuild indices afterwards");
    let order_id = prompt("order_id").parse::<i64>().unwrap_or(0);
    let product_id = prompt("product_id").parse::<i64>().unwrap_or(0);
    let order = jewelry_store::Order {
        timestamp: "2024-01-01T00:00:00".to_string(),
        order_id,
        product_id,
        quantity: 1,
        category_id: 0,
        category_alias: String::new(),
        brand_id: 0,
        price_usd: 0.0,
        user_id: 0,
        gender: b'U',
        color: String::new(),
        metal: String::new(),
        gem: String::new(),
    };
    let mut fd = jewelry_store::util::open_file_a(session.cfg.path(jewelry_store::config::paths::ORDERS_DAT))?;
    jewelry_store::util::write_all(&mut fd, &order.encode(), "append order")?;
    println!("appended; remember to reload in-memory indices (option 6) once the remove counter crosses the rebuild threshold");
    Ok(())
}

fn action_remove_order(session: &mut Session) -> Result<()> {
    let order_id = prompt("order_id to tombstone").parse::<i64>().unwrap_or(0);
    let mut fd = jewelry_store::util::open_file_rw(session.cfg.path(jewelry_store::config::paths::ORDERS_DAT))?;
    let len = jewelry_store::util::file_len(&fd)?;
    let size = jewelry_store::Order::SIZE as u64;
    let mut offset = 0;
    while offset + size <= len {
        let buf = jewelry_store::util::seek_read(&mut fd, offset, jewelry_store::Order::SIZE, "scan for tombstone")?;
        let mut order = jewelry_store::Order::decode(&buf)?;
        if order.order_id == order_id && !order.is_tombstone() {
            order.tombstone();
            use std::io::{Seek, SeekFrom, Write as _};
            fd.seek(SeekFrom::Start(offset)).ok();
            fd.write_all(&order.encode()).ok();
            println!("tombstoned order {}", order_id);
            return Ok(());
        }
        offset += size;
    }
    println!("order {} not found or already tombstoned", order_id);
    Ok(())
}

fn action_load_indices(session: &mut Session) -> Result<()> {
    session.load_indices()?;
    println!("in-memory indices rebuilt");
    Ok(())
}

fn action_search_btree(session: &mut Session) -> Result<()> {
    let key = prompt("product_id").parse::<i64>().unwrap_or(0);
    match &session.btree {
        None => println!("indices not loaded (option 6)"),
        Some(tree) => match tree.search(key) {
            Some(offset) => println!("{:?}", session.read_product_at(offset)?),
            None => println!("not found"),
        },
    }
    Ok(())
}

fn action_search_hash(session: &mut Session) -> Result<()> {
    let key = prompt("product_id").parse::<i64>().unwrap_or(0);
    match &session.hash {
        None => println!("indices not loaded (option 6)"),
        Some(hash) => {
            let entries = hash.lookup(key);
            println!("{} matching order(s)", entries.len());
            for e in entries {
                println!("{:?}", session.read_order_at(e.file_offset)?);
            }
        }
    }
    Ok(())
}

fn action_print_stats(session: &mut Session) -> Result<()> {
    if let Some(tree) = &session.btree {
        print!("{}", tree.stats());
    }
    if let Some(hash) = &session.hash {
        print!("{}", hash.stats());
    }
    if session.btree.is_none() && session.hash.is_none() {
        println!("indices not loaded (option 6)");
    }
    Ok(())
}

fn action_analyze_collisions(session: &mut Session) -> Result<()> {
    match &session.hash {
        None => println!("indices not loaded (option 6)"),
        Some(hash) => println!("{}", hash.stats()),
    }
    Ok(())
}

fn action_benchmarks(session: &mut Session) -> Result<()> {
    use std::time::Instant;
    let start = Instant::now();
    session.load_indices()?;
    println!("index rebuild took {:?}", start.elapsed());
    Ok(())
}

fn action_huffman(encode: bool) -> Result<()> {
    let input = prompt("input file");
    let output = prompt("output file");
    let bytes = std::fs::read(&input).unwrap_or_default();
    if encode {
        let frame = jewelry_store::huffman::encode(&bytes)?;
        std::fs::write(&output, frame).ok();
    } else {
        let data = jewelry_store::huffman::decode(&bytes)?;
        std::fs::write(&output, data).ok();
    }
    println!("done");
    Ok(())
}

fn action_transposition(session: &mut Session, encrypt: bool) -> Result<()> {
    let input = prompt("input file");
    let output = prompt("output file");
    let bytes = std::fs::read(&input).unwrap_or_default();
    let out = if encrypt {
        jewelry_store::transposition::encrypt(&bytes, &session.cfg.transposition_key)?
    } else {
        jewelry_store::transposition::decrypt(&bytes, &session.cfg.transposition_key)?
    };
    std::fs::write(&output, out).ok();
    println!("done");
    Ok(())
}

fn action_protect(session: &mut Session, protect: bool) -> Result<()> {
    let input = prompt("input file");
    let output = prompt("output file");
    if protect {
        jewelry_store::protect::protect(&input, &output, &session.cfg.transposition_key)?;
    } else {
        jewelry_store::protect::restore(&input, &output, &session.cfg.transposition_key)?;
    }
    println!("done");
    Ok(())
}

fn action_verify() -> Result<()> {
    let a = prompt("first file");
    let b = prompt("second file");
    match jewelry_store::protect::verify(&a, &b)? {
        jewelry_store::protect::Verification::Identical => println!("identical"),
        jewelry_store::protect::Verification::SizeMismatch { left, right } => {
            println!("size mismatch: {} vs {}", left, right)
        }
        jewelry_store::protect::Verification::DifferAt { offset } => println!("differs at offset {}", offset),
    }
    Ok(())
}
