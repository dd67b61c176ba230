use super::model::Record;
use super::selection::SiteFilter;

// ---------------------------------------------------------------------------
// Record filters: borrowed, order-preserving subsets
// ---------------------------------------------------------------------------

/// Keep records whose payload lies in the **open** interval `(low, high)`.
///
/// Boundary values are excluded, so `low == high` always yields an empty
/// subset. Input order is preserved.
pub fn filter_by_payload<'a, I>(records: I, low: f64, high: f64) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| r.payload_mass_kg > low && r.payload_mass_kg < high)
        .collect()
}

/// Keep records launched from `site`.
///
/// * [`SiteFilter::AllSites`] → the input, unchanged
/// * [`SiteFilter::Site`]     → exact match on the site id; an unknown site
///   matches nothing and yields an empty subset
pub fn filter_by_site<'a, I>(records: I, site: &SiteFilter) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    match site {
        SiteFilter::AllSites => records.into_iter().collect(),
        SiteFilter::Site(id) => records.into_iter().filter(|r| r.site == *id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        [
            ("siteA", 2000.0, true, "v1"),
            ("siteA", 5000.0, false, "v2"),
            ("siteB", 3000.0, true, "v1"),
            ("siteB", 8000.0, true, "v2"),
        ]
        .into_iter()
        .map(|(site, payload, outcome, booster)| Record {
            site: site.into(),
            payload_mass_kg: payload,
            outcome,
            booster_category: booster.into(),
        })
        .collect()
    }

    fn payloads(subset: &[&Record]) -> Vec<f64> {
        subset.iter().map(|r| r.payload_mass_kg).collect()
    }

    #[test]
    fn payload_filter_is_an_open_interval() {
        let recs = records();
        let subset = filter_by_payload(&recs, 2000.0, 8000.0);
        assert_eq!(payloads(&subset), vec![5000.0, 3000.0]);
    }

    #[test]
    fn payload_filter_with_equal_bounds_is_empty() {
        let recs = records();
        assert!(filter_by_payload(&recs, 5000.0, 5000.0).is_empty());
    }

    #[test]
    fn payload_filter_keeps_dataset_order() {
        let recs = records();
        let subset = filter_by_payload(&recs, 0.0, 10_000.0);
        assert_eq!(payloads(&subset), vec![2000.0, 5000.0, 3000.0, 8000.0]);
    }

    #[test]
    fn all_sites_is_identity() {
        let recs = records();
        let subset = filter_by_site(&recs, &SiteFilter::AllSites);
        assert_eq!(subset.len(), recs.len());
        assert!(subset.iter().zip(&recs).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn specific_site_keeps_matching_records() {
        let recs = records();
        let subset = filter_by_site(&recs, &SiteFilter::Site("siteB".into()));
        assert_eq!(payloads(&subset), vec![3000.0, 8000.0]);
    }

    #[test]
    fn unknown_site_yields_empty_subset() {
        let recs = records();
        assert!(filter_by_site(&recs, &SiteFilter::Site("siteZ".into())).is_empty());
    }

    #[test]
    fn filters_compose_over_subsets() {
        let recs = records();
        let by_payload = filter_by_payload(&recs, 2500.0, 9000.0);
        let by_site = filter_by_site(by_payload, &SiteFilter::Site("siteB".into()));
        assert_eq!(payloads(&by_site), vec![3000.0, 8000.0]);
    }
}
