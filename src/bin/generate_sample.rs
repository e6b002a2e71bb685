//! Writes a deterministic synthetic nutrition table, shaped like the
//! published USDA export, for demos and manual testing:
//!
//! ```sh
//! cargo run --bin generate_sample && cargo run -- sample_foods.csv
//! ```

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

    /// Uniform draw from [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Macro ranges (protein, fat, carbs, in g per 100 g) per source category.
struct CategoryProfile {
    group: &'static str,
    foods: &'static [&'static str],
    protein: (f64, f64),
    fat: (f64, f64),
    carbs: (f64, f64),
}

const PROFILES: &[CategoryProfile] = &[
    CategoryProfile {
        group: "Beef Products",
        foods: &["Beef, ground", "Beef, sirloin", "Beef, brisket", "Beef, ribeye"],
        protein: (17.0, 28.0),
        fat: (5.0, 25.0),
        carbs: (0.0, 0.5),
    },
    CategoryProfile {
        group: "Poultry Products",
        foods: &["Chicken, breast", "Chicken, thigh", "Turkey, roasted", "Duck, meat only"],
        protein: (18.0, 31.0),
        fat: (2.0, 15.0),
        carbs: (0.0, 0.5),
    },
    CategoryProfile {
        group: "Finfish and Shellfish Products",
        foods: &["Salmon, Atlantic", "Cod, Pacific", "Shrimp, cooked", "Tuna, yellowfin"],
        protein: (15.0, 26.0),
        fat: (0.5, 14.0),
        carbs: (0.0, 1.0),
    },
    CategoryProfile {
        group: "Dairy and Egg Products",
        foods: &["Cheese, cheddar", "Milk, whole", "Egg, whole", "Yogurt, plain"],
        protein: (3.0, 25.0),
        fat: (1.0, 33.0),
        carbs: (1.0, 6.0),
    },
    CategoryProfile {
        group: "Fruits and Fruit Juices",
        foods: &["Apples, raw", "Bananas, raw", "Orange juice", "Blueberries, raw"],
        protein: (0.2, 1.5),
        fat: (0.1, 0.6),
        carbs: (8.0, 23.0),
    },
    CategoryProfile {
        group: "Vegetables and Vegetable Products",
        foods: &["Broccoli, raw", "Carrots, raw", "Spinach, raw", "Potatoes, baked"],
        protein: (0.8, 4.0),
        fat: (0.1, 0.7),
        carbs: (3.0, 21.0),
    },
    CategoryProfile {
        group: "Cereal Grains and Pasta",
        foods: &["Rice, white, cooked", "Oats, dry", "Spaghetti, cooked", "Quinoa, cooked"],
        protein: (2.5, 14.0),
        fat: (0.3, 7.0),
        carbs: (21.0, 68.0),
    },
    CategoryProfile {
        group: "Nut and Seed Products",
        foods: &["Almonds, raw", "Walnuts, raw", "Sunflower seeds", "Cashews, roasted"],
        protein: (15.0, 26.0),
        fat: (44.0, 66.0),
        carbs: (12.0, 30.0),
    },
    // Not in the default allow-list: exercises the category filter.
    CategoryProfile {
        group: "Baked Products",
        foods: &["Bagels, plain", "Bread, whole-wheat", "Croissants, butter"],
        protein: (7.0, 12.0),
        fat: (1.0, 21.0),
        carbs: (43.0, 56.0),
    },
];

const VARIANTS: &[&str] = &["raw", "cooked", "canned", "frozen", "dried"];

fn main() {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_foods.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Food Group",
            "Food Name",
            "Protein (g)",
            "Fat (g)",
            "Carbohydrates (g)",
            "Calories",
            "Water (g)",
            "Sugar (g)",
            "Fiber (g)",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for profile in PROFILES {
        for food in profile.foods {
            for variant in VARIANTS {
                let protein = rng.range(profile.protein.0, profile.protein.1);
                let fat = rng.range(profile.fat.0, profile.fat.1);
                let carbs = rng.range(profile.carbs.0, profile.carbs.1);
                let sugar = carbs * rng.range(0.1, 0.7);
                let fiber = (carbs - sugar) * rng.range(0.0, 0.4);
                let calories = 4.0 * protein + 9.0 * fat + 4.0 * carbs;
                let water = (100.0 - protein - fat - carbs).max(0.0) * rng.range(0.6, 1.0);

                write_row(
                    &mut writer,
                    profile.group,
                    &format!("{food}, {variant}"),
                    [protein, fat, carbs, calories, water, sugar, fiber],
                );
                rows += 1;
            }
        }
    }

    // A few zero-macro entries (brines, broths) to exercise the ternary
    // zero-sum handling.
    for name in ["Water chestnut brine", "Vegetable broth, clear"] {
        write_row(
            &mut writer,
            "Vegetables and Vegetable Products",
            name,
            [0.0, 0.0, 0.0, 2.0, 98.0, 0.0, 0.0],
        );
        rows += 1;
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} foods to {output_path}");
}

fn write_row<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    group: &str,
    name: &str,
    values: [f64; 7],
) {
    let mut record = vec![group.to_string(), name.to_string()];
    record.extend(values.iter().map(|v| format!("{v:.1}")));
    writer.write_record(&record).expect("Failed to write row");
}
