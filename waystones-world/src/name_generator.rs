use std::{
    collections::HashSet,
    sync::{Mutex, PoisonError},
};

use rand::{Rng, seq::IndexedRandom};
use waystones_config::{NameGenerationMode, naming::NameGenerationConfig};

use crate::biome::{Biome, BiomeCategory};

const PREFIXES: &[&str] = &[
    "Oak", "Ash", "Elm", "Thorn", "Bram", "Stone", "Raven", "Hollow", "Mist", "Ember", "Frost",
    "Gold", "Iron", "Moss", "Dusk", "Dawn", "Wolf", "Fern", "Silver", "Storm", "Amber", "Briar",
    "Alder", "Cold", "High", "Low", "Red", "Grey", "Wil", "Hart",
];

const INFIXES: &[&str] = &["en", "er", "a", "ow", "ing", "wyn"];

/// Endings that fit anywhere.
const COMMON_SUFFIXES: &[&str] = &["ton", "ford", "stead", "wick", "bury", "ham", "by"];

fn biome_suffixes(category: BiomeCategory) -> &'static [&'static str] {
    match category {
        BiomeCategory::Plains => &["field", "meadow", "dale", "lea"],
        BiomeCategory::Forest => &["shade", "wood", "grove", "glade"],
        BiomeCategory::Taiga => &["pine", "fell", "holt", "wood"],
        BiomeCategory::Icy => &["frost", "rime", "hold", "drift"],
        BiomeCategory::Desert => &["dune", "sand", "well", "reach"],
        BiomeCategory::Savanna => &["veld", "reach", "acre"],
        BiomeCategory::Jungle => &["vine", "thicket", "canopy"],
        BiomeCategory::Swamp => &["mire", "fen", "marsh", "bog"],
        BiomeCategory::Badlands => &["mesa", "crag", "ridge", "butte"],
        BiomeCategory::Beach => &["strand", "shore", "cove"],
        BiomeCategory::Ocean => &["haven", "tide", "reef", "port"],
        BiomeCategory::River => &["brook", "bridge", "wash", "ford"],
        BiomeCategory::Mountain => &["peak", "crag", "spire", "tor"],
        BiomeCategory::Mushroom => &["cap", "spore"],
        BiomeCategory::Nether => &["forge", "cinder", "blaze"],
        BiomeCategory::TheEnd => &["void", "spire", "reach"],
    }
}

/// Hands out waystone names. Every name it returns is unique for its lifetime;
/// clashes get a Roman numeral appended.
pub struct NameGenerator {
    mode: NameGenerationMode,
    custom_names: Vec<String>,
    used_names: Mutex<HashSet<String>>,
}

impl NameGenerator {
    pub fn new(config: &NameGenerationConfig) -> Self {
        Self {
            mode: config.mode,
            custom_names: config.custom_names.clone(),
            used_names: Mutex::new(HashSet::new()),
        }
    }

    pub fn get_name<R: Rng + ?Sized>(&self, biome: Biome, random: &mut R) -> String {
        let mut used_names = self.used_names.lock().unwrap_or_else(PoisonError::into_inner);

        let custom_name = match self.mode {
            NameGenerationMode::RandomOnly => None,
            NameGenerationMode::PresetFirst => self
                .custom_names
                .iter()
                .find(|name| !used_names.contains(*name))
                .cloned(),
            NameGenerationMode::PresetOnly => self.custom_names.choose(&mut *random).cloned(),
            NameGenerationMode::Mixed => {
                if random.random_bool(0.5) {
                    self.custom_names.choose(&mut *random).cloned()
                } else {
                    None
                }
            }
        };
        let name = custom_name.unwrap_or_else(|| procedural_name(biome, random));

        let name = resolve_duplicate(&used_names, name);
        used_names.insert(name.clone());
        name
    }

    /// Reserves a name that is already in use, e.g. by a waystone loaded from storage.
    pub fn mark_used(&self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.used_names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used_names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }
}

fn procedural_name<R: Rng + ?Sized>(biome: Biome, random: &mut R) -> String {
    let mut name = String::new();
    name.push_str(PREFIXES.choose(&mut *random).copied().unwrap_or("Way"));
    if random.random_bool(0.25) {
        name.push_str(INFIXES.choose(&mut *random).copied().unwrap_or_default());
    }
    let suffixes = if random.random_bool(0.25) {
        COMMON_SUFFIXES
    } else {
        biome_suffixes(biome.category())
    };
    name.push_str(suffixes.choose(&mut *random).copied().unwrap_or("stone"));
    name
}

fn resolve_duplicate(used_names: &HashSet<String>, name: String) -> String {
    if !used_names.contains(&name) {
        return name;
    }
    let mut i = 2;
    loop {
        let candidate = format!("{name} {}", to_roman(i));
        if !used_names.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

fn to_roman(mut number: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut roman = String::new();
    for (value, numeral) in NUMERALS {
        while number >= value {
            roman.push_str(numeral);
            number -= value;
        }
    }
    roman
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::StdRng};
    use waystones_config::{NameGenerationMode, naming::NameGenerationConfig};

    use super::{NameGenerator, biome_suffixes, to_roman, COMMON_SUFFIXES};
    use crate::biome::Biome;

    fn generator(mode: NameGenerationMode, custom_names: &[&str]) -> NameGenerator {
        NameGenerator::new(&NameGenerationConfig {
            mode,
            custom_names: custom_names.iter().map(|name| name.to_string()).collect(),
        })
    }

    #[test]
    fn roman_numerals() {
        assert_eq!(to_roman(2), "II");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(1994), "MCMXCIV");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generator(NameGenerationMode::RandomOnly, &[]);
        let b = generator(NameGenerationMode::RandomOnly, &[]);
        let mut random_a = StdRng::seed_from_u64(42);
        let mut random_b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                a.get_name(Biome::Forest, &mut random_a),
                b.get_name(Biome::Forest, &mut random_b)
            );
        }
    }

    #[test]
    fn procedural_names_follow_the_biome() {
        let generator = generator(NameGenerationMode::RandomOnly, &[]);
        let mut random = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let name = generator.get_name(Biome::Desert, &mut random);
            assert!(name.chars().next().unwrap().is_ascii_uppercase());
            // Strip a numeral suffix from repeated names.
            let base = name.split(' ').next().unwrap();
            assert!(
                biome_suffixes(Biome::Desert.category())
                    .iter()
                    .chain(COMMON_SUFFIXES)
                    .any(|suffix| base.ends_with(suffix)),
                "{name} has no desert or common suffix"
            );
        }
    }

    #[test]
    fn names_are_unique() {
        let generator = generator(NameGenerationMode::RandomOnly, &[]);
        let mut random = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            assert!(seen.insert(generator.get_name(Biome::Plains, &mut random)));
        }
    }

    #[test]
    fn preset_first_uses_custom_names_in_order() {
        let generator = generator(NameGenerationMode::PresetFirst, &["Spawn", "Old Mill"]);
        let mut random = StdRng::seed_from_u64(3);
        assert_eq!(generator.get_name(Biome::Plains, &mut random), "Spawn");
        assert_eq!(generator.get_name(Biome::Plains, &mut random), "Old Mill");
        let third = generator.get_name(Biome::Plains, &mut random);
        assert!(third != "Spawn" && third != "Old Mill" && !third.is_empty());
    }

    #[test]
    fn preset_first_skips_names_marked_used() {
        let generator = generator(NameGenerationMode::PresetFirst, &["Spawn", "Old Mill"]);
        generator.mark_used("Spawn");
        let mut random = StdRng::seed_from_u64(3);
        assert_eq!(generator.get_name(Biome::Plains, &mut random), "Old Mill");
        assert!(generator.is_used("Old Mill"));
    }

    #[test]
    fn preset_only_numbers_repeats() {
        let generator = generator(NameGenerationMode::PresetOnly, &["Spawn"]);
        let mut random = StdRng::seed_from_u64(5);
        assert_eq!(generator.get_name(Biome::Plains, &mut random), "Spawn");
        assert_eq!(generator.get_name(Biome::Plains, &mut random), "Spawn II");
        assert_eq!(generator.get_name(Biome::Plains, &mut random), "Spawn III");
    }

    #[test]
    fn preset_only_without_names_falls_back() {
        let generator = generator(NameGenerationMode::PresetOnly, &[]);
        let mut random = StdRng::seed_from_u64(5);
        assert!(!generator.get_name(Biome::Ocean, &mut random).is_empty());
    }

    #[test]
    fn mixed_mode_uses_both_sources() {
        let generator = generator(NameGenerationMode::Mixed, &["Spawn"]);
        let mut random = StdRng::seed_from_u64(11);
        let names: Vec<String> = (0..40)
            .map(|_| generator.get_name(Biome::Taiga, &mut random))
            .collect();
        assert!(names.iter().any(|name| name.starts_with("Spawn")));
        assert!(names.iter().any(|name| !name.starts_with("Spawn")));
    }
}
