use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "brave", "calm", "clever", "eager", "fervent", "gallant", "happy", "jolly", "keen", "lucid",
    "modest", "nifty", "quirky", "serene", "sharp", "stoic", "vibrant", "wizardly", "zealous",
];

const NOUNS: &[&str] = &[
    "babbage", "curie", "darwin", "euler", "fermat", "galois", "hopper", "kepler", "lovelace",
    "noether", "pascal", "ritchie", "shannon", "tesla", "turing", "wozniak",
];

/// Random resource name such as `srv-serene-lovelace`.
pub fn random_name(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("quiet");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("server");
    format!("{}-{}-{}", prefix, adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_prefix() {
        let name = random_name("srv");
        assert!(name.starts_with("srv-"));
        assert_eq!(name.split('-').count(), 3);
    }
}
