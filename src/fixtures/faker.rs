// Seeded filler text for fixtures and the profile endpoint
use fastrand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bao", "Carmen", "Dmitri", "Elena", "Farah", "Giulia", "Hiro", "Ines", "Jonas", "Khanh",
    "Lena", "Marco", "Nadia", "Oscar", "Priya", "Quinn", "Rosa", "Sven", "Tuan", "Uma", "Victor",
    "Wen", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Becker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hoang", "Ivanova",
    "Jensen", "Kowalski", "Le", "Moreau", "Nguyen", "Okafor", "Pham", "Rossi", "Schmidt", "Tran",
    "Vargas", "Weber", "Yamamoto",
];

const CITIES: &[&str] = &[
    "Amsterdam", "Berlin", "Da Nang", "Hanoi", "Ho Chi Minh City", "Kyoto", "Lisbon", "Lyon",
    "Melbourne", "Montreal", "Oslo", "Porto", "Seattle", "Valencia",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "inbox.test"];

const WORDS: &[&str] = &[
    "alias", "amet", "aperiam", "beatae", "blanditis", "commodi", "consequatur", "culpa",
    "delectus", "dolor", "dolores", "eaque", "eius", "enim", "error", "est", "eum", "facilis",
    "fugiat", "harum", "illo", "ipsa", "ipsum", "itaque", "labore", "laborum", "magnam", "minima",
    "molestiae", "nam", "natus", "nemo", "nihil", "nisi", "nobis", "odio", "officia", "omnis",
    "pariatur", "placeat", "porro", "quae", "quia", "quis", "ratione", "rem", "rerum", "saepe",
    "sequi", "sint", "sit", "sunt", "tempora", "totam", "ullam", "velit", "veniam", "vitae",
    "voluptas", "voluptatem",
];

const UID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub struct Faker {
    rng: Rng,
}

impl Default for Faker {
    fn default() -> Self {
        Self { rng: Rng::new() }
    }
}

impl Faker {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Rng::with_seed(seed) }
    }

    /// Uniform integer in `min..=max`.
    pub fn integer(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.i64(min..=max)
    }

    pub fn double(&mut self, min: f64, max: f64) -> f64 {
        min + self.rng.f64() * (max - min)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.usize(..items.len())]
    }

    /// Short lowercase base36 id, stable for a given seed
    pub fn uid(&mut self) -> String {
        (0..14)
            .map(|_| UID_ALPHABET[self.rng.usize(..UID_ALPHABET.len())] as char)
            .collect()
    }

    pub fn first_name(&mut self) -> &'static str {
        *self.pick(FIRST_NAMES)
    }

    pub fn last_name(&mut self) -> &'static str {
        *self.pick(LAST_NAMES)
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn city(&mut self) -> String {
        self.pick(CITIES).to_string()
    }

    pub fn email(&mut self) -> String {
        let first = self.first_name();
        let last = self.last_name();
        let domain = self.pick(EMAIL_DOMAINS);
        format!("{}.{}@{}", first, last, domain)
    }

    pub fn words(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| *self.pick(WORDS))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A capitalised phrase of 2 to 6 words, no trailing period
    pub fn title(&mut self) -> String {
        let count = self.integer(2, 6) as usize;
        capitalize(&self.words(count))
    }

    pub fn sentence(&mut self) -> String {
        let count = self.integer(6, 12) as usize;
        format!("{}.", capitalize(&self.words(count)))
    }

    /// `YYYY-MM-DD` between 2015 and 2024
    pub fn date(&mut self) -> String {
        let year = self.integer(2015, 2024);
        let month = self.integer(1, 12);
        let day = self.integer(1, 28);
        format!("{:04}-{:02}-{:02}", year, month, day)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
