//! Documentation coverage statistics.

use crate::model::{MethodDoc, Revision, Stats};

/// Tally documented and exampled methods.
///
/// `total_methods` is the number of extracted registrations, so
/// documented + undocumented always equals the total.
pub fn aggregate(methods: &[MethodDoc], date: String, revision: Revision) -> Stats {
    let total_methods = methods.len();
    let documented_methods = methods.iter().filter(|m| m.is_documented()).count();
    let exampled_methods = methods.iter().filter(|m| m.has_examples()).count();

    Stats {
        total_methods,
        documented_methods,
        documented_percent: percent(documented_methods, total_methods),
        exampled_methods,
        exampled_percent: percent(exampled_methods, total_methods),
        date,
        revision,
    }
}

/// `part / total * 100`, rounded half away from zero. Zero when `total` is zero.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    ((part * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documented(name: &str, examples: usize) -> MethodDoc {
        MethodDoc::Documented {
            name: name.into(),
            description: "docs".into(),
            signatures: Vec::new(),
            examples: vec!["example".to_string(); examples],
            returns: None,
        }
    }

    fn undocumented(name: &str) -> MethodDoc {
        MethodDoc::Undocumented { name: name.into() }
    }

    #[test]
    fn percent_zero_total() {
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(percent(1, 8), 13); // 12.5
        assert_eq!(percent(3, 8), 38); // 37.5
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn percent_bounds() {
        assert_eq!(percent(0, 7), 0);
        assert_eq!(percent(7, 7), 100);
    }

    #[test]
    fn one_of_two_documented() {
        let methods = vec![documented("circle", 1), undocumented("square")];
        let stats = aggregate(&methods, String::new(), Revision::default());
        assert_eq!(stats.total_methods, 2);
        assert_eq!(stats.documented_methods, 1);
        assert_eq!(stats.documented_percent, 50);
        assert_eq!(stats.exampled_methods, 1);
        assert_eq!(stats.exampled_percent, 50);
    }

    #[test]
    fn documented_without_examples() {
        let methods = vec![documented("a", 0), documented("b", 2), documented("c", 0)];
        let stats = aggregate(&methods, String::new(), Revision::default());
        assert_eq!(stats.documented_percent, 100);
        assert_eq!(stats.exampled_methods, 1);
        assert_eq!(stats.exampled_percent, 33);
    }

    #[test]
    fn no_methods() {
        let stats = aggregate(&[], String::new(), Revision::default());
        assert_eq!(stats.total_methods, 0);
        assert_eq!(stats.documented_percent, 0);
        assert_eq!(stats.exampled_percent, 0);
    }
}
