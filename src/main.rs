//! # Billhead CLI
//!
//! Usage:
//!   billhead input.json -o output.pdf
//!   echo '{ ... }' | billhead -o output.pdf
//!   billhead input.json --base64
//!   billhead --example > invoice.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_invoice_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    };

    // Blob mode: print the base64 payload instead of writing a file.
    if args.iter().any(|a| a == "--base64") {
        let request = match serde_json::from_str(&input) {
            Ok(req) => req,
            Err(e) => {
                eprintln!("✗ Failed to parse request: {}", e);
                std::process::exit(1);
            }
        };
        match billhead::render_base64(&request, &billhead::RenderOptions::default()) {
            Ok(payload) => println!("{}", payload),
            Err(e) => {
                eprintln!("✗ Could not generate document: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone());

    match billhead::render_json(&input) {
        Ok(pdf_bytes) => {
            let path = output_path.unwrap_or_else(|| {
                // Fall back to the deterministic artifact name.
                serde_json::from_str::<billhead::model::RenderRequest>(&input)
                    .map(|req| billhead::artifact_name(req.kind, &req.number))
                    .unwrap_or_else(|_| "output.pdf".to_string())
            });
            fs::write(&path, &pdf_bytes).expect("Failed to write PDF");
            eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), path);
        }
        Err(e) => {
            eprintln!("✗ Could not generate document: {}", e);
            std::process::exit(1);
        }
    }
}

fn example_invoice_json() -> &'static str {
    r##"{
  "kind": "Invoice",
  "number": "INV-2026-001",
  "issued": "February 14, 2026",
  "due": "March 1, 2026",
  "theme": "modern",
  "issuer": {
    "name": "Acme Builders LLC",
    "address": "123 Business St, Suite 100\nSan Francisco, CA 94102",
    "phone": "(415) 555-0188",
    "website": "acmebuilders.example"
  },
  "counterparty": {
    "name": "Widget Industries",
    "address": "456 Client Ave\nNew York, NY 10001"
  },
  "items": [
    { "description": "Site preparation and demolition", "quantity": 40, "rate": 150.0 },
    { "description": "Framing labor", "quantity": 20, "rate": 175.0 },
    { "description": "Materials - lumber package", "quantity": 1, "rate": 2500.0 }
  ],
  "charges": { "taxRate": 8.0 },
  "notes": "Payment is due within 15 days of invoice date. Please make checks payable to Acme Builders LLC.",
  "metadata": { "title": "Invoice INV-2026-001", "author": "Acme Builders LLC" }
}"##
}
