//! Algebraic properties and end-to-end compile scenarios.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use selector_cond::xpath::compile_clause;
use selector_cond::{
    compile_path_query, parse_cond, AttrCond, CondExpr, CondResult, Selector, TagCond, TextCond,
    NO_MATCH_XPATH,
};

/// Compiled clauses as a multiset, ignoring clause order.
fn clause_set(expr: &CondExpr) -> Vec<String> {
    let mut clauses: Vec<String> = expr.clauses().iter().map(compile_clause).collect();
    clauses.sort();
    clauses
}

fn atoms() -> CondResult<(CondExpr, CondExpr, CondExpr, CondExpr)> {
    Ok((
        TagCond::new("a")?.into(),
        AttrCond::contains("class", "nav")?.into(),
        TextCond::equals("Home")?.into(),
        (TagCond::new("button")? | AttrCond::equals("role", "button")?),
    ))
}

#[test]
fn or_is_commutative_over_clause_sets() -> CondResult<()> {
    let (a, b, _, d) = atoms()?;
    assert_eq!(clause_set(&a.or_(&d)), clause_set(&d.or_(&a)));
    assert_eq!(clause_set(&a.or_(&b)), clause_set(&b.or_(&a)));
    Ok(())
}

#[test]
fn or_is_associative() -> CondResult<()> {
    let (a, b, c, _) = atoms()?;
    let left = a.or_(&b).or_(&c);
    let right = a.or_(b.or_(&c));
    assert_eq!(left.to_xpath(), right.to_xpath());
    Ok(())
}

#[test]
fn and_distributes_over_or() -> CondResult<()> {
    let (a, b, c, _) = atoms()?;
    let factored = a.or_(&b).and_(&c);
    let expanded = a.and_(&c).or_(b.and_(&c));
    assert_eq!(clause_set(&factored), clause_set(&expanded));

    let left_factored = c.and_(a.or_(&b));
    let left_expanded = c.and_(&a).or_(c.and_(&b));
    assert_eq!(clause_set(&left_factored), clause_set(&left_expanded));
    Ok(())
}

#[test]
fn and_is_associative() -> CondResult<()> {
    let (a, b, c, d) = atoms()?;
    for (x, y, z) in [(&a, &b, &c), (&d, &b, &c), (&a, &d, &c), (&b, &c, &d)] {
        let left = x.and_(y).and_(z);
        let right = x.and_(y.and_(z));
        assert_eq!(clause_set(&left), clause_set(&right));
    }
    Ok(())
}

#[test]
fn combining_never_mutates_operands() -> CondResult<()> {
    let (a, _, c, d) = atoms()?;
    let e1 = a.or_(&c);
    let e2 = d.clone();
    let before = (compile_path_query(&e1), compile_path_query(&e2));

    let product = e1.and_(&e2);
    let union = &e1 | &e2;
    let _ = product.and_(&union);

    assert_eq!(compile_path_query(&e1), before.0);
    assert_eq!(compile_path_query(&e2), before.1);
    Ok(())
}

#[test]
fn stored_intermediate_stays_usable() -> CondResult<()> {
    let base = TagCond::new("input")? | TagCond::new("textarea")?;
    let named = base.and_(AttrCond::equals("name", "q")?);
    let placeholder = base.and_(AttrCond::contains("placeholder", "Search")?);

    assert_eq!(
        named.to_xpath(),
        ".//input[@name = 'q'] | .//textarea[@name = 'q']"
    );
    assert_eq!(
        placeholder.to_xpath(),
        ".//input[contains(@placeholder, 'Search')] | .//textarea[contains(@placeholder, 'Search')]"
    );
    assert_eq!(base.to_xpath(), ".//input | .//textarea");
    Ok(())
}

#[test]
fn cross_product_clauses_are_independent() -> CondResult<()> {
    let left = AttrCond::equals("a", "1")? | AttrCond::equals("a", "2")?;
    let right = AttrCond::equals("b", "1")? | AttrCond::equals("b", "2")?;
    let expr = left.and_(&right);
    assert_eq!(
        expr.to_xpath(),
        ".//*[@a = '1' and @b = '1'] | .//*[@a = '1' and @b = '2'] | \
         .//*[@a = '2' and @b = '1'] | .//*[@a = '2' and @b = '2']"
    );
    Ok(())
}

#[test]
fn tag_conflict_yields_no_clause() -> CondResult<()> {
    let expr = TagCond::new("div")? & TagCond::new("span")?;
    assert!(expr.is_empty());
    assert_eq!(expr.to_xpath(), NO_MATCH_XPATH);
    Ok(())
}

#[test]
fn partial_conflicts_keep_surviving_pairings() -> CondResult<()> {
    let expr = (TagCond::new("a")? | AttrCond::equals("role", "link")?) & TagCond::new("span")?;
    assert_eq!(expr.len(), 1);
    assert_eq!(expr.to_xpath(), ".//span[@role = 'link']");
    Ok(())
}

#[test]
fn same_tag_is_idempotent() -> CondResult<()> {
    let expr = TagCond::new("li")? & TagCond::new("li")?;
    assert_eq!(expr.to_xpath(), ".//li");
    Ok(())
}

#[test]
fn literal_with_both_quotes_uses_concat() -> CondResult<()> {
    let expr: CondExpr = AttrCond::equals("title", "a'b\"c")?.into();
    assert_eq!(
        expr.to_xpath(),
        ".//*[@title = concat('a', \"'\", 'b\"c')]"
    );
    Ok(())
}

#[test]
fn scenario_input_with_type() -> CondResult<()> {
    let expr = TagCond::new("input")? & AttrCond::equals("type", "text")?;
    assert_eq!(expr.to_xpath(), ".//input[@type = 'text']");
    Ok(())
}

#[test]
fn scenario_class_split_css() -> CondResult<()> {
    let selector = Selector::from(AttrCond::equals("class", "a b")?);
    assert_eq!(selector.to_css()?, ".a.b");

    let expr: CondExpr = AttrCond::equals("class", "a b")?.into();
    assert_eq!(expr.to_css()?, ".a.b");
    Ok(())
}

#[test]
fn scenario_alternated_clauses() -> CondResult<()> {
    let expr = (TagCond::new("a")? & TextCond::contains("Go")?) | TagCond::new("button")?;
    let query = expr.to_xpath();
    let parts: Vec<&str> = query.split(" | ").collect();
    assert_eq!(
        parts,
        [".//a[contains(normalize-space(), 'Go')]", ".//button"]
    );
    Ok(())
}

#[test]
fn scenario_single_char_suffix() -> CondResult<()> {
    let expr: CondExpr = AttrCond::ends_with("href", "x")?.into();
    assert_eq!(
        expr.to_xpath(),
        ".//*[substring(@href, string-length(@href) - 0) = 'x']"
    );
    Ok(())
}

#[test]
fn document_and_builder_agree() -> CondResult<()> {
    let doc = serde_json::json!({"and": [
        {"or": [{"tag": "a"}, {"tag": "button"}]},
        {"attr": {"name": "data-test", "value": "submit", "match": "startswith"}}
    ]});
    let from_doc = parse_cond(&doc)?;
    let built = (TagCond::new("a")? | TagCond::new("button")?)
        & AttrCond::starts_with("data-test", "submit")?;
    assert_eq!(from_doc, built);

    let unique: BTreeSet<String> = clause_set(&built).into_iter().collect();
    assert_eq!(unique.len(), 2);
    Ok(())
}

#[test]
fn shared_expression_combines_across_threads() -> CondResult<()> {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CondExpr>();
    assert_send_sync::<Selector>();

    let shared = Arc::new(TagCond::new("input")? | TagCond::new("textarea")?);
    let before = shared.to_xpath();

    let workers: Vec<_> = [("name", "q"), ("id", "search")]
        .into_iter()
        .map(|(attr, value)| {
            let shared = Arc::clone(&shared);
            let attr = AttrCond::equals(attr, value);
            thread::spawn(move || attr.map(|attr| shared.and_(attr).to_xpath()))
        })
        .collect();

    let mut results = Vec::new();
    for worker in workers {
        results.push(worker.join().expect("worker panicked")?);
    }

    assert_eq!(
        results,
        [
            ".//input[@name = 'q'] | .//textarea[@name = 'q']",
            ".//input[@id = 'search'] | .//textarea[@id = 'search']",
        ]
    );
    assert_eq!(shared.to_xpath(), before);
    Ok(())
}
