use std::fs::File;

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

    /// Pick one element of a slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Uniform float in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn generate_review(rng: &mut SimpleRng) -> String {
    let adjectives = [
        "great", "awful", "solid", "flimsy", "quiet", "loud", "reliable", "decent",
    ];
    let nouns = [
        "build", "motor", "design", "battery", "finish", "packaging", "manual",
    ];
    let verbs = ["works", "feels", "looks", "arrived", "broke", "rattles"];
    let tails = [
        "after two weeks",
        "out of the box",
        "for the price",
        "every single day",
        "on my desk",
    ];

    // Short fillers keep the length-filter heuristic honest downstream.
    let mut review = format!(
        "the {} {} {} {}",
        rng.pick(&nouns),
        rng.pick(&verbs),
        rng.pick(&adjectives),
        rng.pick(&tails),
    );

    if rng.next_f64() < 0.5 {
        review.push_str(&format!(
            " and the {} is {} so far",
            rng.pick(&nouns),
            rng.pick(&adjectives),
        ));
    }

    review
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let products = [
        "Coffee Grinder",
        "Desk Lamp",
        "Mechanical Keyboard",
        "Travel Kettle",
    ];
    let reviewers = ["Alice", "Bob", "Chandra", "Dmitri"];
    let reviews_per_product = 12;

    let output_path = "sample_data.csv";
    let file = File::create(output_path).expect("Failed to create output file");
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["review_id", "product", "reviewer", "rating", "review"])
        .expect("Failed to write header");

    let mut row_id: i64 = 0;
    for product in products {
        for _ in 0..reviews_per_product {
            let rating = 1 + (rng.next_u64() % 5);
            let review = generate_review(&mut rng);
            let reviewer = *rng.pick(&reviewers);

            let id = row_id.to_string();
            let rating = rating.to_string();
            writer
                .write_record([id.as_str(), product, reviewer, rating.as_str(), review.as_str()])
                .expect("Failed to write row");
            row_id += 1;
        }
    }

    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {} reviews across {} products to {output_path}",
        row_id,
        products.len()
    );
}
