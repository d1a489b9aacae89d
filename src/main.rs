use std::env;
use std::path;
use std::process;

use mztab::MzTabReader;

fn main() {
    let args: Vec<String> = env::args().collect();
    let path: &path::Path;
    if args.len() > 1 {
        path = path::Path::new(&args[1]);
    } else {
        path = path::Path::new("./test/data/small.mzTab");
    }
    println!("Path: {}", path.display());
    let reader = match MzTabReader::open_path(path) {
        Ok(reader) => reader,
        Err(err) => {
            eprintln!("Failed to open {}: {}", path.display(), err);
            process::exit(1);
        }
    };
    let document = match reader.read_document() {
        Ok(document) => document,
        Err(err) => {
            eprintln!("Failed to read {}: {}", path.display(), err);
            process::exit(1);
        }
    };
    let meta = &document.metadata;
    if let Some(mode) = meta.mode {
        println!("Mode: {}", mode);
    }
    if let Some(mztab_type) = meta.mztab_type {
        println!("Type: {}", mztab_type);
    }
    if let Some(title) = &meta.title {
        println!("Title: {}", title);
    }
    println!("MS runs: {}", meta.ms_runs.len());
    println!("Samples: {}", meta.samples.len());
    for species in meta.species() {
        println!("  Species: {}", species);
    }
    println!("Proteins: {}", document.proteins.len());
    println!("Peptides: {}", document.peptides.len());
    println!("PSMs: {}", document.psms.len());
    println!("Small molecules: {}", document.small_molecules.len());
}
