use itertools::Itertools;

/// Fixed display priority for the well-known team sizes. Every other label
/// (`4-man`, `8-man`, ...) sorts after these, keeping its encounter order.
pub fn team_size_priority(label: &str) -> u8 {
    match label {
        "solo" => 1,
        "duo" => 2,
        "trio" => 3,
        _ => 4,
    }
}

/// Deduplicates team-size labels in encounter order, then stably sorts them
/// by [`team_size_priority`].
pub fn sort_team_sizes(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = labels.into_iter().unique().collect_vec();
    out.sort_by_key(|label| team_size_priority(label));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_duo_trio_come_first_in_order() {
        let sorted = sort_team_sizes(
            ["8-man", "trio", "solo", "duo"]
                .map(String::from)
                .into_iter(),
        );
        assert_eq!(sorted, ["solo", "duo", "trio", "8-man"]);
    }

    #[test]
    fn other_labels_keep_encounter_order() {
        let sorted = sort_team_sizes(
            ["5-man", "duo", "4-man", "solo", "5-man"]
                .map(String::from)
                .into_iter(),
        );
        assert_eq!(sorted, ["solo", "duo", "5-man", "4-man"]);
    }

    #[test]
    fn duplicates_are_removed() {
        let sorted = sort_team_sizes(["solo", "solo", "solo"].map(String::from).into_iter());
        assert_eq!(sorted, ["solo"]);
    }
}
