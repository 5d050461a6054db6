use super::rules::{Rule, RuleSet};

/// Result of running a `RuleSet` over one document.
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// Content after every rule has been applied.
    pub content: String,
    /// Total substitutions across all rules.
    pub replacements: usize,
    /// Substitutions per rule, in rule order.
    pub per_rule: Vec<usize>,
    changed: bool,
}

impl Rewrite {
    /// Whether the final content differs from the original.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// The rewritten content, or `None` when it is identical to the input.
    pub fn into_changed(self) -> Option<String> {
        self.changed.then_some(self.content)
    }
}

/// Apply each rule in order against the evolving content.
///
/// A rule's matches are counted during its own substitution pass. The count
/// only contributes when the substitution altered the text, so a rule whose
/// replacement reproduces what it matched adds nothing.
pub fn rewrite(content: &str, rules: &RuleSet) -> Rewrite {
    let mut current = content.to_string();
    let mut per_rule = Vec::with_capacity(rules.len());

    for rule in rules {
        match substitute(rule, &current) {
            Some((next, count)) if next != current => {
                current = next;
                per_rule.push(count);
            }
            _ => per_rule.push(0),
        }
    }

    let changed = current != content;
    Rewrite {
        content: current,
        replacements: per_rule.iter().sum(),
        per_rule,
        changed,
    }
}

/// Replace all non-overlapping matches, returning the new text and match count.
fn substitute(rule: &Rule, text: &str) -> Option<(String, usize)> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for caps in rule.regex.captures_iter(text) {
        let Some(m) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..m.start()]);
        caps.expand(&rule.replacement, &mut out);
        last = m.end();
        count += 1;
    }

    if count == 0 {
        return None;
    }

    out.push_str(&text[last..]);
    Some((out, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::RuleSpec;

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        let specs: Vec<RuleSpec> = pairs.iter().map(|(p, r)| RuleSpec::new(*p, *r)).collect();
        RuleSet::compile(&specs).unwrap()
    }

    #[test]
    fn heading_gets_one_dark_class() {
        let input = r#"<h1 className="text-3xl font-bold text-gray-900">Jobs</h1>"#;
        let result = rewrite(input, &RuleSet::builtin().unwrap());

        assert!(result.is_changed());
        assert_eq!(result.replacements, 1);
        assert_eq!(
            result.content,
            r#"<h1 className="text-3xl font-bold text-gray-900 dark:text-white">Jobs</h1>"#
        );
    }

    #[test]
    fn literal_attribute_counts_exactly_once() {
        let input = r#"className="text-3xl font-bold text-gray-900""#;
        let result = rewrite(input, &RuleSet::builtin().unwrap());

        assert_eq!(result.replacements, 1);
        assert_eq!(
            result.content,
            r#"className="text-3xl font-bold text-gray-900 dark:text-white""#
        );
    }

    #[test]
    fn capture_group_is_carried_into_replacement() {
        let input = r#"<p className="text-gray-600" id="lead">Hi</p>"#;
        let result = rewrite(input, &RuleSet::builtin().unwrap());

        assert_eq!(
            result.content,
            r#"<p className="text-gray-600 dark:text-gray-400" id="lead">Hi</p>"#
        );
        assert_eq!(result.replacements, 1);
    }

    #[test]
    fn counts_sum_across_rules_and_matches() {
        let input = concat!(
            r#"<h2 className="text-xl font-bold text-gray-900">A</h2>"#,
            "\n",
            r#"<h2 className="text-xl font-bold text-gray-900">B</h2>"#,
            "\n",
            r#"<span className="text-sm text-gray-500">c</span>"#,
        );
        let result = rewrite(input, &RuleSet::builtin().unwrap());

        assert_eq!(result.replacements, 3);
        assert_eq!(result.per_rule[2], 2);
        assert_eq!(result.per_rule[8], 1);
    }

    #[test]
    fn no_match_is_unchanged() {
        let input = "export default function Page() { return null }\n";
        let result = rewrite(input, &RuleSet::builtin().unwrap());

        assert!(!result.is_changed());
        assert_eq!(result.replacements, 0);
        assert!(result.into_changed().is_none());
    }

    #[test]
    fn second_pass_is_unchanged() {
        let input = concat!(
            r#"<h1 className="text-3xl font-bold text-gray-900">x</h1>"#,
            r#"<h1 className="text-2xl font-bold text-gray-900">x</h1>"#,
            r#"<h1 className="text-xl font-bold text-gray-900">x</h1>"#,
            r#"<h3 className="text-lg font-semibold text-gray-900">x</h3>"#,
            r#"<h4 className="font-semibold text-gray-900">x</h4>"#,
            r#"<ArrowLeft className="w-6 h-6 text-gray-900" />"#,
            r#"<ArrowLeft className="w-5 h-5 text-gray-900" />"#,
            r#"<p className="text-gray-600" title="t">x</p>"#,
            r#"<p className="text-sm text-gray-500">x</p>"#,
            r#"<button className="p-2 hover:bg-gray-100 rounded-lg transition">x</button>"#,
            r#"<div className="bg-white rounded-xl border border-gray-200 p-6 shadow-sm">x</div>"#,
            r#"<div className="bg-white rounded-xl border border-gray-200 p-4">x</div>"#,
        );
        let rules = RuleSet::builtin().unwrap();

        let first = rewrite(input, &rules);
        assert!(first.is_changed());
        assert_eq!(first.replacements, 12);
        assert!(first.per_rule.iter().all(|&n| n == 1));

        let second = rewrite(&first.content, &rules);
        assert!(!second.is_changed());
        assert_eq!(second.replacements, 0);
    }

    #[test]
    fn builtin_replacements_are_not_rematched() {
        let rules = RuleSet::builtin().unwrap();
        for rule in &rules {
            let produced = rule.replacement().replace("${1}", "");
            let again = rewrite(&produced, &rules);
            assert!(
                !again.is_changed(),
                "replacement {:?} is matched again",
                rule.replacement()
            );
        }
    }

    #[test]
    fn rule_order_is_load_bearing() {
        let forward = rules(&[("a", "ab"), ("ab", "X")]);
        let reverse = rules(&[("ab", "X"), ("a", "ab")]);

        assert_eq!(rewrite("a", &forward).content, "X");
        assert_eq!(rewrite("a", &reverse).content, "ab");
    }

    #[test]
    fn later_rule_misses_text_consumed_earlier() {
        let set = rules(&[("gray-900", "slate-900"), ("text-gray-900", "text-white")]);
        let result = rewrite("text-gray-900", &set);

        assert_eq!(result.content, "text-slate-900");
        assert_eq!(result.per_rule, vec![1, 0]);
    }

    #[test]
    fn identity_rule_contributes_nothing() {
        let set = rules(&[("foo", "foo"), ("bar", "baz")]);
        let result = rewrite("foo bar", &set);

        assert_eq!(result.per_rule, vec![0, 1]);
        assert_eq!(result.replacements, 1);
        assert_eq!(result.content, "foo baz");
    }

    #[test]
    fn named_groups_expand() {
        let set = rules(&[(r"(?P<tone>gray|slate)-900", "${tone}-100")]);
        assert_eq!(rewrite("gray-900 slate-900", &set).content, "gray-100 slate-100");
    }

    #[test]
    fn empty_rule_set_leaves_text_alone() {
        let result = rewrite("anything", &RuleSet::default());
        assert!(!result.is_changed());
        assert!(result.per_rule.is_empty());
    }

    #[test]
    fn empty_matches_skip_the_position_after_a_match() {
        let result = rewrite("baaac", &rules(&[("a*", "-")]));

        assert_eq!(result.content, "-b-c-");
        assert_eq!(result.replacements, 3);
    }
}
