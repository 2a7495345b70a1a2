use std::env;
use std::process::exit;

use regex::Regex;

use hanzi_lookup::{CompositionCatalog, StardictStore};

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} translate <dict-prefix> <word> [--no-pinyin]", program);
    eprintln!(
        "  {} find <decomposition-db> <component>... [--config <pattern>] [--among <chars>]",
        program
    );
    eprintln!("  {} describe <decomposition-db> <character>", program);
    exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("hanzi-lookup");

    match args.get(1).map(String::as_str) {
        Some("translate") => translate(program, &args[2..]),
        Some("find") => find(program, &args[2..]),
        Some("describe") => describe(program, &args[2..]),
        _ => usage(program),
    }
}

fn translate(program: &str, args: &[String]) {
    let (prefix, word) = match (args.first(), args.get(1)) {
        (Some(prefix), Some(word)) => (prefix, word),
        _ => usage(program),
    };
    let tag_pronunciation = !args.iter().any(|a| a == "--no-pinyin");

    let store = match StardictStore::open(prefix, tag_pronunciation) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: Failed to load dictionary '{}'", prefix);
            eprintln!("  {}", e);
            exit(1);
        }
    };

    println!("Dictionary '{}': {} words", prefix, store.len());
    match store.lookup(word) {
        Some(translation) => println!("{} {}", word, translation),
        None => println!("{} <no definition>", word),
    }
}

fn find(program: &str, args: &[String]) {
    let Some(db) = args.first() else { usage(program) };

    let mut required: Vec<&str> = Vec::new();
    let mut config_pattern: Option<Regex> = None;
    let mut among: Option<Vec<&str>> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let Some(pattern) = args.get(i + 1) else { usage(program) };
                match Regex::new(pattern) {
                    Ok(re) => config_pattern = Some(re),
                    Err(e) => {
                        eprintln!("ERROR: Invalid configuration pattern: {}", e);
                        exit(1);
                    }
                }
                i += 2;
            }
            "--among" => {
                let Some(chars) = args.get(i + 1) else { usage(program) };
                among = Some(chars.split(',').collect());
                i += 2;
            }
            component => {
                required.push(component);
                i += 1;
            }
        }
    }
    if required.is_empty() {
        usage(program);
    }

    let mut catalog = CompositionCatalog::new(db);
    let result = match among {
        Some(candidates) => catalog.find(&candidates, &required, config_pattern.as_ref()),
        None => catalog.find_all(&required, config_pattern.as_ref()),
    };

    match result {
        Ok(matches) if matches.is_empty() => println!("<no matches>"),
        Ok(matches) => {
            for (i, character) in matches.iter().enumerate() {
                println!("{} #{}", character, i + 1);
            }
        }
        Err(e) => {
            eprintln!("ERROR: Failed to query composition database '{}'", db);
            eprintln!("  {}", e);
            exit(1);
        }
    }
}

fn describe(program: &str, args: &[String]) {
    let (db, character) = match (args.first(), args.get(1)) {
        (Some(db), Some(character)) => (db, character),
        _ => usage(program),
    };

    let mut catalog = CompositionCatalog::new(db);
    match catalog.describe(character) {
        Ok(Some(entry)) => {
            println!("{} [{}]", entry.character, entry.configuration);
            println!("  components: {}", entry.components.join(" "));
        }
        Ok(None) => println!("{} <not decomposed>", character),
        Err(e) => {
            eprintln!("ERROR: Failed to query composition database '{}'", db);
            eprintln!("  {}", e);
            exit(1);
        }
    }
}
