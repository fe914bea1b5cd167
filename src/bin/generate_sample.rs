//! Writes a synthetic review table in the same CSV layout the viewer loads,
//! so the grid can be explored without network access.

use anyhow::{Context, Result};
use clap::Parser;

use food_grid::data::loader::format_tag_list;
use food_grid::data::model::PriceTier;

#[derive(Debug, Parser)]
#[command(about = "Generate a synthetic restaurant review CSV")]
struct Args {
    /// Output CSV path.
    #[arg(long, default_value = "sample_reviews.csv")]
    output: String,

    /// Number of restaurants.
    #[arg(long, default_value_t = 250)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Main category and the extra tags it may carry.
const CUISINES: [(&str, &[&str]); 8] = [
    ("American", &["Burgers", "Diners", "Sandwiches"]),
    ("Italian", &["Pizza", "Wine Bars", "Pasta Shops"]),
    ("Mexican", &["Tacos", "Tex-Mex", "Cocktail Bars"]),
    ("Ethiopian", &["African", "Vegetarian"]),
    ("Japanese", &["Sushi Bars", "Ramen", "Izakaya"]),
    ("Bars", &["Cocktail Bars", "Dive Bars", "Sports Bars"]),
    ("French", &["Brasseries", "Bakeries", "Wine Bars"]),
    ("Cafes", &["Coffee & Tea", "Breakfast & Brunch", "Women's Clothing"]),
];

const NAME_FIRST: [&str; 10] = [
    "Golden", "Little", "Blue", "Old Town", "Corner", "Capitol", "Rose", "Union", "Federal", "Red",
];
const NAME_SECOND: [&str; 8] = [
    "Kitchen", "Table", "House", "Tavern", "Spoon", "Garden", "Grill", "Room",
];

struct Draft {
    name: String,
    main_category: &'static str,
    categories: Vec<String>,
    price: PriceTier,
    average_rating: f64,
    total_reviews: u64,
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

fn rescale(v: f64, (min, max): (f64, f64)) -> f64 {
    if max > min { (v - min) / (max - min) * 100.0 } else { 0.0 }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let drafts: Vec<Draft> = (0..args.count)
        .map(|i| {
            let (main, extra) = *rng.pick(&CUISINES);
            let mut categories = vec![main.to_string()];
            categories.push(rng.pick(extra).to_string());
            let price = *rng.pick(&PriceTier::ALL);
            // Pricier places skew slightly better rated.
            let average_rating =
                (rng.gauss(3.6 + price.rank() as f64 * 0.1, 0.45) * 2.0).round().clamp(2.0, 10.0) / 2.0;
            let total_reviews = rng.gauss(5.0, 1.1).exp().round().max(1.0) as u64;
            Draft {
                name: format!("{} {} #{i}", rng.pick(&NAME_FIRST), rng.pick(&NAME_SECOND)),
                main_category: main,
                categories,
                price,
                average_rating,
                total_reviews,
            }
        })
        .collect();

    let ratings: Vec<f64> = drafts.iter().map(|d| d.average_rating).collect();
    let reviews: Vec<f64> = drafts.iter().map(|d| d.total_reviews as f64).collect();
    let rating_span = min_max(&ratings);
    let review_span = min_max(&reviews);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output))?;
    writer.write_record([
        "",
        "name",
        "main_category",
        "categories",
        "price",
        "average_rating",
        "normalized_rating",
        "rounded_normalized_rating",
        "total_reviews",
        "normalized_total_reviews",
        "rounded_normalized_total_reviews",
        "url",
    ])?;

    for (i, d) in drafts.iter().enumerate() {
        let normalized_rating = rescale(d.average_rating, rating_span);
        let normalized_reviews = rescale(d.total_reviews as f64, review_span);
        let slug = d.name.to_lowercase().replace([' ', '#'], "-");
        writer.write_record([
            i.to_string(),
            d.name.clone(),
            d.main_category.to_string(),
            format_tag_list(&d.categories),
            d.price.symbol().to_string(),
            d.average_rating.to_string(),
            format!("{normalized_rating:.4}"),
            (normalized_rating.round() as i64).to_string(),
            d.total_reviews.to_string(),
            format!("{normalized_reviews:.4}"),
            (normalized_reviews.round() as i64).to_string(),
            format!("https://www.yelp.com/biz/{slug}"),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {} restaurants to {}", drafts.len(), args.output);
    Ok(())
}
