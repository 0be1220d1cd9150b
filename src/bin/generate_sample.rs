use anyhow::{Context, Result};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const ROWS: usize = 200;
/// Share of `satisfaction` cells left blank; stays under the 20% a numeric
/// column may miss.
const MISSING_RATE: f64 = 0.1;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let cities = ["Lisbon", "Oslo", "Austin", "Osaka", "Lagos"];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "id",
        "height_cm",
        "weight_kg",
        "age",
        "income_k",
        "outdoor_temp_c",
        "heating_cost",
        "commute_min",
        "satisfaction",
        "city",
    ])?;

    for id in 0..ROWS {
        let height = rng.gauss(172.0, 9.0);
        // Linear in height: strong Pearson correlation.
        let weight = 0.9 * height - 85.0 + rng.gauss(0.0, 4.0);
        let age = 22.0 + rng.next_f64() * 40.0;
        // Monotonic but convex in age: Spearman above Pearson.
        let income = 20.0 + 0.0009 * (age - 18.0).powi(4) + rng.gauss(0.0, 3.0);
        let temp = rng.gauss(8.0, 7.0);
        // Anti-correlated with temperature.
        let heating = (180.0 - 6.5 * temp + rng.gauss(0.0, 15.0)).max(0.0);
        let commute = rng.next_f64() * 60.0;
        let satisfaction = if rng.next_f64() < MISSING_RATE {
            String::new()
        } else {
            format!("{:.1}", (rng.gauss(6.5, 1.5)).clamp(0.0, 10.0))
        };

        writer.write_record([
            id.to_string(),
            format!("{height:.1}"),
            format!("{weight:.1}"),
            format!("{age:.0}"),
            format!("{income:.1}"),
            format!("{temp:.1}"),
            format!("{heating:.0}"),
            format!("{commute:.0}"),
            satisfaction,
            rng.pick(&cities).to_string(),
        ])?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {ROWS} rows to {output_path}");
    Ok(())
}
