use anyhow::{Context, Result};
use rusty_catalog::data::model::Product;

const CATEGORIES: [&str; 5] = ["Networking", "Cables", "Storage", "Peripherals", "Power"];
const BRANDS: [&str; 6] = ["Acme", "Bolt", "Zyxel", "Northwind", "Kestrel", "Orbit"];
const WARRANTIES: [&str; 4] = ["6 Months", "1 Year", "2 Years", "3 Years"];
const NOUNS: [&str; 8] = [
    "Switch", "Router", "Cable, 2m", "SSD", "Keyboard", "Mouse", "UPS", "Adapter",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn price(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + self.next_f64() * (hi - lo)) * 100.0).round() / 100.0
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_catalog.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let n_rows = 60;
    for i in 0..n_rows {
        let brand = rng.pick(&BRANDS);
        let dp_price = rng.price(5.0, 400.0);
        let rp_price = (dp_price * (1.1 + rng.next_f64() * 0.3) * 100.0).round() / 100.0;

        let mut product = Product {
            id: Some((1000 + i).to_string()),
            product_no: format!("SKU-{:04}", i + 1),
            category: rng.pick(&CATEGORIES).to_string(),
            brand: brand.to_string(),
            name: format!("{brand} {}", rng.pick(&NOUNS)),
            warranty: rng.pick(&WARRANTIES).to_string(),
            dp_price,
            rp_price,
            map_price: (rp_price * 1.05 * 100.0).round() / 100.0,
            mrp_price: (rp_price * 1.2 * 100.0).round() / 100.0,
            url: Some(format!("https://example.com/products/{}", i + 1)),
            ..Product::default()
        };

        // Sprinkle in the gaps real exports have.
        match i % 10 {
            3 => product.url = None,
            6 => product.warranty.clear(),
            9 => product.name.clear(),
            _ => {}
        }

        writer
            .serialize(&product)
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} products to {output_path}");
    Ok(())
}
