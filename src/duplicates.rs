use std::collections::HashMap;

/// The class at `later` repeats the class at `earlier` verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate {
    pub later: usize,
    pub earlier: usize,
}

/// Finds exact repetitions. Every repetition points at the first occurrence.
pub fn find_duplicates<S: AsRef<str>>(classnames: &[S]) -> Vec<Duplicate> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for (index, classname) in classnames.iter().enumerate() {
        match first_seen.get(classname.as_ref()) {
            Some(&earlier) => duplicates.push(Duplicate {
                later: index,
                earlier,
            }),
            None => {
                first_seen.insert(classname.as_ref(), index);
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_duplicates() {
        let duplicates = find_duplicates(&["flex", "w-4", "flex", "hover:flex", "flex"]);
        assert_eq!(
            duplicates,
            vec![
                Duplicate { later: 2, earlier: 0 },
                Duplicate { later: 4, earlier: 0 }
            ]
        );
    }

    #[test]
    fn test_no_duplicates() {
        assert!(find_duplicates(&["flex", "Flex", "flex!"]).is_empty());
        assert!(find_duplicates::<&str>(&[]).is_empty());
    }
}
