use proptest::prelude::*;

use launch_dash::data::filter::{filter_by_payload, filter_by_site};
use launch_dash::data::model::{Dataset, Record};
use launch_dash::data::selection::{Selection, SiteFilter};
use launch_dash::engine::{aggregate_outcomes, compute};

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
const BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

fn record_strategy() -> impl Strategy<Value = Record> {
    (0..SITES.len(), 0u32..16_000, any::<bool>(), 0..BOOSTERS.len()).prop_map(
        |(site, payload, outcome, booster)| Record {
            site: SITES[site].to_string(),
            // Whole kilograms so boundary collisions with the range happen often.
            payload_mass_kg: f64::from(payload),
            outcome,
            booster_category: BOOSTERS[booster].to_string(),
        },
    )
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record_strategy(), 1..60)
        .prop_map(|recs| Dataset::from_records(recs).unwrap())
}

fn site_strategy() -> impl Strategy<Value = SiteFilter> {
    prop_oneof![
        Just(SiteFilter::AllSites),
        (0..SITES.len()).prop_map(|i| SiteFilter::Site(SITES[i].to_string())),
        Just(SiteFilter::Site("Boca Chica".to_string())),
    ]
}

proptest! {
    /// Varying the payload range never changes the all-sites distribution.
    #[test]
    fn all_sites_distribution_ignores_range(
        ds in dataset_strategy(),
        a in -1000.0f64..17_000.0,
        b in -1000.0f64..17_000.0,
    ) {
        let baseline = compute(&ds, &Selection::unbounded(SiteFilter::AllSites));
        let ranged = compute(&ds, &Selection::new(SiteFilter::AllSites, a, b));
        prop_assert_eq!(baseline.distribution, ranged.distribution);
    }

    /// Only strictly-inside payloads survive, in dataset order.
    #[test]
    fn payload_filter_is_strict_and_stable(
        ds in dataset_strategy(),
        low in 0u32..16_000,
        width in 0u32..8_000,
    ) {
        let (low, high) = (f64::from(low), f64::from(low + width));
        let subset = filter_by_payload(ds.records(), low, high);

        for r in &subset {
            prop_assert!(low < r.payload_mass_kg && r.payload_mass_kg < high);
        }
        let expected: Vec<&Record> = ds
            .records()
            .iter()
            .filter(|r| low < r.payload_mass_kg && r.payload_mass_kg < high)
            .collect();
        prop_assert_eq!(subset, expected);
    }

    /// `AllSites` is the identity filter.
    #[test]
    fn all_sites_filter_is_identity(ds in dataset_strategy()) {
        let subset = filter_by_site(ds.records(), &SiteFilter::AllSites);
        prop_assert_eq!(subset.len(), ds.len());
        prop_assert!(subset.iter().zip(ds.records()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    /// Same inputs, same outputs, down to the serialized bytes.
    #[test]
    fn pipeline_is_idempotent(
        ds in dataset_strategy(),
        site in site_strategy(),
        a in -1000.0f64..17_000.0,
        b in -1000.0f64..17_000.0,
    ) {
        let selection = Selection::new(site, a, b);
        let first = serde_json::to_vec(&compute(&ds, &selection)).unwrap();
        let second = serde_json::to_vec(&compute(&ds, &selection)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Specific-site counts partition that site's records.
    #[test]
    fn site_distribution_partitions_site_records(
        ds in dataset_strategy(),
        site in site_strategy(),
    ) {
        let dist = aggregate_outcomes(&ds, &site);
        match &site {
            SiteFilter::AllSites => {
                let successes = ds.records().iter().filter(|r| r.outcome).count() as u64;
                prop_assert_eq!(dist.total(), successes);
                prop_assert_eq!(dist.slices.len(), ds.sites().len());
            }
            SiteFilter::Site(id) => {
                let n = ds.records().iter().filter(|r| &r.site == id).count() as u64;
                prop_assert_eq!(dist.total(), n);
                prop_assert_eq!(dist.slices.len(), 2);
            }
        }
    }

    /// Correlation points never fall outside the raw range or the chosen site.
    #[test]
    fn correlation_respects_selection(
        ds in dataset_strategy(),
        site in site_strategy(),
        a in 0.0f64..16_000.0,
        b in 0.0f64..16_000.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let results = compute(&ds, &Selection::new(site.clone(), a, b));
        for p in &results.correlation.points {
            prop_assert!(low < p.payload_mass_kg && p.payload_mass_kg < high);
        }
        if let SiteFilter::Site(id) = &site {
            let allowed = filter_by_site(ds.records(), &site).len();
            prop_assert!(results.correlation.len() <= allowed);
            if !ds.sites().contains(id) {
                prop_assert!(results.correlation.is_empty());
            }
        }
    }
}
