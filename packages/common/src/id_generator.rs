use crc32fast::Hasher;

/// Generate a stable seed from a page id using CRC32
pub fn get_seed(page_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(page_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for components within a page
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String, // Page seed (CRC32)
    count: u32,   // Sequential counter
}

impl IDGenerator {
    pub fn new(page_id: &str) -> Self {
        Self {
            seed: get_seed(page_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate the next ID for which `taken` returns false
    pub fn new_unique_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Get page seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_generation() {
        let seed1 = get_seed("home");
        let seed2 = get_seed("home");

        // Same page always generates same seed
        assert_eq!(seed1, seed2);

        // Different pages generate different seeds
        assert_ne!(seed1, get_seed("about"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::new("home");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
    }

    #[test]
    fn test_unique_ids_skip_taken() {
        let mut gen = IDGenerator::from_seed("p".to_string());
        let taken = ["p-1", "p-2"];

        let id = gen.new_unique_id(|candidate| taken.contains(&candidate));
        assert_eq!(id, "p-3");
    }
}
