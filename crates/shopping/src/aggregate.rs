use std::collections::HashMap;

/// One line of a generated shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedItem {
    pub name: String,
    pub quantity: String,
}

/// Key under which two ingredient names count as the same item.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Collapses ingredients sharing a name, compared case-insensitively.
///
/// The first spelling and first amount seen win. An ingredient met `k > 1`
/// times gets the quantity `"{amount} (x{k})"`; amounts are never summed.
/// Output keeps first-seen order.
pub fn aggregate<'a, I>(ingredients: I) -> Vec<AggregatedItem>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, &'a str, usize)> = Vec::new();

    for (name, amount) in ingredients {
        let key = name_key(name);
        match seen.get(&key) {
            Some(index) => groups[*index].2 += 1,
            None => {
                seen.insert(key, groups.len());
                groups.push((name, amount, 1));
            }
        }
    }

    groups
        .into_iter()
        .map(|(name, amount, count)| AggregatedItem {
            name: name.to_owned(),
            quantity: match count {
                1 => amount.to_owned(),
                count => format!("{amount} (x{count})"),
            },
        })
        .collect()
}

/// Quantity of an item that receives one more amount of the same ingredient.
pub fn merge_quantity(existing: &str, amount: &str) -> String {
    format!("{existing} + {amount}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_ingredient_is_counted() {
        let items = aggregate([("Eggs", "4 large"), ("Flour", "200 g"), ("Eggs", "4 large")]);

        assert_eq!(
            items,
            vec![
                AggregatedItem {
                    name: "Eggs".to_owned(),
                    quantity: "4 large (x2)".to_owned(),
                },
                AggregatedItem {
                    name: "Flour".to_owned(),
                    quantity: "200 g".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn first_spelling_and_amount_win() {
        let items = aggregate([
            ("Olive Oil", "2 tbsp"),
            ("olive oil", "1 cup"),
            ("OLIVE OIL", ""),
        ]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Olive Oil");
        assert_eq!(items[0].quantity, "2 tbsp (x3)");
    }

    #[test]
    fn distinct_ingredients_are_untouched() {
        let items = aggregate([("Salt", "1 pinch"), ("Pepper", "")]);

        assert_eq!(
            items.iter().map(|i| i.quantity.as_str()).collect::<Vec<_>>(),
            vec!["1 pinch", ""]
        );
        assert!(aggregate(Vec::<(&str, &str)>::new()).is_empty());
    }

    #[test]
    fn merge_appends_amount() {
        assert_eq!(merge_quantity("2 cups", "1 cup"), "2 cups + 1 cup");
        assert_eq!(
            merge_quantity(&merge_quantity("1", "2"), "3"),
            "1 + 2 + 3"
        );
    }
}
