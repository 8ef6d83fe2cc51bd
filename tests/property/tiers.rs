use proptest::prelude::*;
use trainer_core::{tier_for, Tier};

proptest! {
    #[test]
    fn every_loss_lands_in_exactly_one_range(loss in any::<u32>()) {
        let tier = tier_for(loss);
        let in_range = match tier {
            Tier::Great => loss == 0,
            Tier::Good => (1..=10).contains(&loss),
            Tier::Inaccuracy => (11..=50).contains(&loss),
            Tier::Mistake => (51..=100).contains(&loss),
            Tier::Blunder => loss > 100,
        };
        prop_assert!(in_range, "{} classified as {}", loss, tier);
    }

    #[test]
    fn tier_never_improves_as_loss_grows(a in 0u32..1_000, b in 0u32..1_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tier_for(lo) <= tier_for(hi));
    }

    #[test]
    fn tier_name_parses_back(loss in any::<u32>()) {
        let tier = tier_for(loss);
        prop_assert_eq!(tier.name().parse::<Tier>().unwrap(), tier);
    }
}
