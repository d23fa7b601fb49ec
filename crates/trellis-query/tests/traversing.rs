//! Traversal tests for trellis-query
//!
//! Navigation, filtering, positions, chain history and unions over the
//! fruit / vegetable / drink lists.

use trellis_query::{
    Boundary, Document, Flow, Mapped, Matcher, NodeId, NodeType, QueryError, Selection,
};

const FRUITS: &str = r#"<ul id="fruits"><li class="apple">Apple</li><li class="orange">Orange</li><li class="pear">Pear</li></ul>"#;

const FOOD: &str = r#"<ul id="food"><ul id="fruits"><li class="apple">Apple</li><li class="orange">Orange</li><li class="pear">Pear</li></ul><ul id="vegetables"><li class="carrot">Carrot</li><li class="sweetcorn">Sweetcorn</li></ul></ul>"#;

const DRINKS: &str = r#"<ul id="drinks"><li class="beer">Beer</li><li class="juice">Juice</li><li class="milk">Milk</li><li class="water">Water</li><li class="cider">Cider</li></ul>"#;

const TEXT: &str = "<p>Apples, <b>oranges</b> and pears.</p><p>Carrots and <!-- sweetcorn --></p>";

fn load(html: &str) -> Document {
    Document::load(html).unwrap()
}

fn select(doc: &Document, selector: &str) -> Selection {
    doc.select(selector).unwrap()
}

fn node(doc: &Document, selector: &str) -> NodeId {
    select(doc, selector).get(0).unwrap()
}

/// Class, else id, else tag name of every node
fn labels(sel: &Selection) -> Vec<String> {
    let doc = sel.document();
    sel.iter()
        .map(|n| {
            doc.attr(n, "class")
                .or_else(|| doc.attr(n, "id"))
                .or_else(|| doc.tag_name(n))
                .unwrap_or_default()
        })
        .collect()
}

fn is_unmatched_pseudo(err: QueryError) -> bool {
    matches!(err, QueryError::SelectorSyntax(_)) && err.to_string().contains("unmatched pseudo-class")
}

// ============================================================================
// FIND
// ============================================================================

#[test]
fn test_find_descendants() {
    let doc = load(FRUITS);
    let fruits = select(&doc, "#fruits");
    assert_eq!(labels(&fruits.find(".apple").unwrap()), ["apple"]);
    assert_eq!(fruits.find("li").unwrap().len(), 3);
    assert_eq!(fruits.find("LI").unwrap().len(), 3);
    assert!(select(&doc, "ul").find("blah").unwrap().is_empty());
    assert!(select(&doc, "#not-fruits").find("li").unwrap().is_empty());
}

#[test]
fn test_find_never_returns_self() {
    let doc = load(FRUITS);
    assert!(select(&doc, "#fruits").find("ul").unwrap().is_empty());
}

#[test]
fn test_find_merges_overlapping_scopes() {
    let doc = load(FOOD);
    let found = select(&doc, "#fruits, #food").find(".apple").unwrap();
    assert_eq!(labels(&found), ["apple"]);
}

#[test]
fn test_find_relative_child() {
    let doc = load("<foo><bar><bar></bar><bar></bar></bar></foo>");
    assert_eq!(select(&doc, "foo").find("> bar").unwrap().len(), 1);
}

#[test]
fn test_find_invalid_selector() {
    let doc = load(FRUITS);
    let err = select(&doc, "#fruits").find(":bah").unwrap_err();
    assert!(is_unmatched_pseudo(err));
}

#[test]
fn test_find_selection_keeps_contained_nodes() {
    let doc = load(FOOD);
    let li = select(&doc, "li");

    let found = select(&doc, "#fruits").find(&li).unwrap();
    assert_eq!(labels(&found), ["apple", "orange", "pear"]);

    let found = select(&doc, ".apple, #vegetables").find(&li).unwrap();
    assert_eq!(labels(&found), ["carrot", "sweetcorn"]);
}

#[test]
fn test_find_node() {
    let doc = load(FOOD);
    let apple = node(&doc, ".apple");
    let carrot = node(&doc, ".carrot");

    assert_eq!(labels(&select(&doc, "#fruits").find(apple).unwrap()), ["apple"]);
    assert_eq!(
        labels(&select(&doc, "#fruits, #vegetables").find(carrot).unwrap()),
        ["carrot"]
    );
    assert!(select(&doc, "#fruits").find(carrot).unwrap().is_empty());
}

#[test]
fn test_descendants_lists_elements_only() {
    let doc = load(TEXT);
    let all = select(&doc, "p").descendants();
    assert_eq!(labels(&all), ["b"]);
}

// ============================================================================
// CHILDREN & CONTENTS
// ============================================================================

#[test]
fn test_children() {
    let doc = load(FRUITS);
    assert_eq!(select(&doc, "ul").children(None).unwrap().len(), 3);
    assert_eq!(labels(&select(&doc, "ul").children(Some(".orange")).unwrap()), ["orange"]);
    assert!(select(&doc, "ul").children(Some(".lulz")).unwrap().is_empty());
}

#[test]
fn test_children_of_every_node() {
    let doc = load(FOOD);
    assert_eq!(select(&doc, "ul ul").children(None).unwrap().len(), 5);
}

#[test]
fn test_children_only_immediate() {
    let doc = load(FRUITS);
    let food = doc.fragment(FOOD).unwrap();
    assert!(food.children(Some("li")).unwrap().is_empty());
}

#[test]
fn test_contents_include_text_and_comments() {
    let doc = load(TEXT);
    let contents = select(&doc, "p").contents();
    assert_eq!(contents.len(), 5);
    assert_eq!(doc.node_type(contents.get(0).unwrap()), Some(NodeType::Text));
    assert_eq!(doc.node_type(contents.get(-1).unwrap()), Some(NodeType::Comment));
}

#[test]
fn test_contents_keep_spacing_between_inline_elements() {
    let doc = load("<p><b>a</b> <i>b</i></p>");
    let p = select(&doc, "p");
    let contents = p.contents();
    assert_eq!(contents.len(), 3);
    assert_eq!(doc.text(contents.get(1).unwrap()), " ");
    assert_eq!(p.text(), "a b");
    assert_eq!(labels(&p.children(None).unwrap()), ["b", "i"]);
}

// ============================================================================
// SIBLINGS
// ============================================================================

#[test]
fn test_next() {
    let doc = load(FRUITS);
    assert_eq!(labels(&select(&doc, ".orange").next(None).unwrap()), ["pear"]);
    assert!(select(&doc, ".pear").next(None).unwrap().is_empty());
    assert!(select(&doc, ".banana").next(None).unwrap().is_empty());
    assert!(select(&doc, ".apple").next(Some(".non-existent")).unwrap().is_empty());
    assert_eq!(select(&doc, ".apple").next(Some(".orange")).unwrap().len(), 1);

    let doc = load(FOOD);
    assert_eq!(select(&doc, ".apple, .orange").next(None).unwrap().len(), 2);
}

#[test]
fn test_next_all() {
    let doc = load(FRUITS);
    assert_eq!(labels(&select(&doc, ".apple").next_all(None).unwrap()), ["orange", "pear"]);
    assert!(select(&doc, ".pear").next_all(None).unwrap().is_empty());
    assert!(select(&doc, ".banana").next_all(None).unwrap().is_empty());
    assert_eq!(select(&doc, ".apple").next_all(Some(".pear")).unwrap().len(), 1);

    let doc = load(FOOD);
    assert_eq!(select(&doc, ".apple, .carrot").next_all(None).unwrap().len(), 3);
    assert_eq!(select(&doc, ".apple, .orange").next_all(None).unwrap().len(), 2);
    assert!(select(&doc, "#fruits").next_all(Some("li")).unwrap().is_empty());
}

#[test]
fn test_next_until() {
    let doc = load(FOOD);
    let apple = select(&doc, ".apple");
    assert_eq!(labels(&apple.next_until(Boundary::Unbounded, None).unwrap()), ["orange", "pear"]);
    assert_eq!(labels(&apple.next_until(".pear", None).unwrap()), ["orange"]);
    assert_eq!(apple.next_until("#vegetables", None).unwrap().len(), 2);
    assert_eq!(
        select(&doc, ".apple, .carrot").next_until(None::<&str>, None).unwrap().len(),
        3
    );
    assert_eq!(
        select(&doc, ".apple, .orange").next_until(None::<&str>, None).unwrap().len(),
        2
    );
    assert!(select(&doc, ".pear").next_until(None::<&str>, None).unwrap().is_empty());
    assert!(select(&doc, ".banana").next_until(None::<&str>, None).unwrap().is_empty());
}

#[test]
fn test_next_until_skips_non_elements() {
    let doc = load(FRUITS);
    let wrapper = doc
        .fragment("<div><div></div><!-- comment -->text<div></div></div>")
        .unwrap();
    let first = wrapper.children(None).unwrap().eq(0);
    assert_eq!(first.next_until(Boundary::Unbounded, None).unwrap().len(), 1);
}

#[test]
fn test_next_until_with_filter() {
    let doc = load(DRINKS);
    let milk = select(&doc, ".beer").next_until(".water", Some(".milk")).unwrap();
    assert_eq!(labels(&milk), ["milk"]);

    let list = doc.fragment("<ul><li></li><li><p></p></li></ul>").unwrap();
    let first = list.find("li").unwrap().eq(0);
    assert!(first.next_until(None::<&str>, Some("p")).unwrap().is_empty());
}

#[test]
fn test_next_until_node_and_selection() {
    let doc = load(FRUITS);
    let fruits = select(&doc, "#fruits").children(None).unwrap();
    let stop = fruits.get(2).unwrap();
    assert_eq!(fruits.eq(0).next_until(stop, None).unwrap().len(), 1);

    let drinks = doc.fragment(DRINKS).unwrap().children(None).unwrap();
    let until = doc.wrap([drinks.get(4).unwrap(), drinks.get(3).unwrap()]).unwrap();
    assert_eq!(labels(&drinks.eq(0).next_until(&until, None).unwrap()), ["juice", "milk"]);
}

#[test]
fn test_prev() {
    let doc = load(FRUITS);
    assert_eq!(labels(&select(&doc, ".orange").prev(None).unwrap()), ["apple"]);
    assert!(select(&doc, ".apple").prev(None).unwrap().is_empty());
    assert!(select(&doc, ".banana").prev(None).unwrap().is_empty());
    assert!(select(&doc, ".orange").prev(Some(".non-existent")).unwrap().is_empty());
    assert_eq!(select(&doc, ".orange").prev(Some(".apple")).unwrap().len(), 1);

    let doc = load(FOOD);
    assert_eq!(select(&doc, ".orange, .pear").prev(None).unwrap().len(), 2);
}

#[test]
fn test_prev_all() {
    let doc = load(FRUITS);
    assert_eq!(labels(&select(&doc, ".pear").prev_all(None).unwrap()), ["orange", "apple"]);
    assert!(select(&doc, ".apple").prev_all(None).unwrap().is_empty());
    assert_eq!(select(&doc, ".pear").prev_all(Some(".apple")).unwrap().len(), 1);

    let doc = load(FOOD);
    assert_eq!(select(&doc, ".orange, .sweetcorn").prev_all(None).unwrap().len(), 2);
    assert_eq!(select(&doc, ".orange, .pear").prev_all(None).unwrap().len(), 2);
    assert!(select(&doc, "#vegetables").prev_all(Some("li")).unwrap().is_empty());
}

#[test]
fn test_prev_until() {
    let doc = load(FOOD);
    assert_eq!(
        labels(&select(&doc, ".pear").prev_until(None::<&str>, None).unwrap()),
        ["orange", "apple"]
    );
    assert_eq!(labels(&select(&doc, ".pear").prev_until(".apple", None).unwrap()), ["orange"]);
    assert_eq!(
        labels(&select(&doc, ".sweetcorn").prev_until("#fruits", None).unwrap()),
        ["carrot"]
    );
    assert_eq!(
        select(&doc, ".pear, .sweetcorn").prev_until(None::<&str>, None).unwrap().len(),
        3
    );
    assert_eq!(
        select(&doc, ".orange, .pear").prev_until(None::<&str>, None).unwrap().len(),
        2
    );
    assert!(select(&doc, ".apple").prev_until(None::<&str>, None).unwrap().is_empty());

    let wrapper = doc
        .fragment(r#"<div class="1"><div class="2"></div><!-- comment -->text<div class="3"></div></div>"#)
        .unwrap();
    let last = wrapper.children(None).unwrap().last();
    assert_eq!(labels(&last.prev_until(None::<&str>, None).unwrap()), ["2"]);
}

#[test]
fn test_prev_until_with_filter_and_boundaries() {
    let doc = load(DRINKS);
    let water = select(&doc, ".cider").prev_until(".juice", Some(".water")).unwrap();
    assert_eq!(labels(&water), ["water"]);

    let list = doc.fragment("<ul><li><p></p></li><li></li></ul>").unwrap();
    let second = list.find("li").unwrap().eq(1);
    assert!(second.prev_until(None::<&str>, Some("p")).unwrap().is_empty());

    let drinks = select(&doc, "#drinks").children(None).unwrap();
    assert_eq!(drinks.eq(2).prev_until(drinks.get(0).unwrap(), None).unwrap().len(), 1);

    let until = doc.wrap([drinks.get(0).unwrap(), drinks.get(1).unwrap()]).unwrap();
    assert_eq!(labels(&drinks.eq(4).prev_until(&until, None).unwrap()), ["water", "milk"]);
}

#[test]
fn test_siblings() {
    let doc = load(FRUITS);
    assert_eq!(select(&doc, ".orange").siblings(None).unwrap().len(), 2);
    assert!(select(&doc, "#fruits").siblings(None).unwrap().is_empty());
    assert_eq!(labels(&select(&doc, ".orange").siblings(Some(".apple")).unwrap()), ["apple"]);
    assert!(select(&doc, ".orange").siblings(Some(".peach")).unwrap().is_empty());

    let err = select(&doc, ".orange").siblings(Some(":bah")).unwrap_err();
    assert!(is_unmatched_pseudo(err));

    let doc = load(FOOD);
    assert_eq!(select(&doc, ".apple, .carrot").siblings(None).unwrap().len(), 3);
    assert!(select(&doc, "#fruits").siblings(Some("li")).unwrap().is_empty());
}

// ============================================================================
// ANCESTORS
// ============================================================================

#[test]
fn test_parents_nearest_first() {
    let doc = load(FOOD);
    assert_eq!(
        labels(&select(&doc, ".orange").parents(None).unwrap()),
        ["fruits", "food", "body", "html"]
    );
    assert_eq!(
        labels(&select(&doc, "#fruits").parents(None).unwrap()),
        ["food", "body", "html"]
    );
    assert_eq!(labels(&select(&doc, ".orange").parents(Some("#fruits")).unwrap()), ["fruits"]);
    assert_eq!(
        labels(&select(&doc, ".orange").parents(Some("ul")).unwrap()),
        ["fruits", "food"]
    );
}

#[test]
fn test_parents_empty_cases() {
    let doc = load(FOOD);
    assert!(select(&doc, ".saladbar").parents(None).unwrap().is_empty());
    assert!(select(&doc, "html").parents(None).unwrap().is_empty());
}

#[test]
fn test_parents_of_many_walk_backwards() {
    let doc = load(FOOD);
    assert_eq!(
        labels(&select(&doc, "li").parents(None).unwrap()),
        ["vegetables", "food", "body", "html", "fruits"]
    );
}

#[test]
fn test_parents_until() {
    let doc = load(FOOD);
    let orange = select(&doc, ".orange");
    assert_eq!(
        labels(&orange.parents_until(None::<&str>, None).unwrap()),
        ["fruits", "food", "body", "html"]
    );
    assert_eq!(labels(&orange.parents_until("#food", None).unwrap()), ["fruits"]);
    assert!(orange.parents_until("#fruits", None).unwrap().is_empty());
    assert_eq!(orange.parents_until(".apple", None).unwrap().len(), 4);

    let two = select(&doc, ".apple, .sweetcorn");
    assert_eq!(
        labels(&two.parents_until(None::<&str>, None).unwrap()),
        ["vegetables", "food", "body", "html", "fruits"]
    );
    assert_eq!(
        labels(&two.parents_until(".saladbar", Some("#vegetables")).unwrap()),
        ["vegetables"]
    );

    assert!(select(&doc, ".saladbar").parents_until(None::<&str>, None).unwrap().is_empty());
    assert!(select(&doc, "html").parents_until(None::<&str>, None).unwrap().is_empty());
}

#[test]
fn test_parents_until_selection() {
    let doc = load(FOOD);
    let until = select(&doc, "#food");
    let orange = select(&doc, "#fruits").children(None).unwrap().eq(1);
    assert_eq!(labels(&orange.parents_until(&until, None).unwrap()), ["fruits"]);
}

#[test]
fn test_parent() {
    let doc = load(FOOD);
    assert_eq!(labels(&select(&doc, ".orange").parent(None).unwrap()), ["fruits"]);
    assert_eq!(labels(&select(&doc, "li").parent(None).unwrap()), ["fruits", "vegetables"]);
    assert_eq!(labels(&select(&doc, "li").parent(Some("#fruits")).unwrap()), ["fruits"]);
    assert!(select(&doc, "html").parent(None).unwrap().is_empty());
    assert_eq!(select(&doc, "#fruits li").parent(None).unwrap().len(), 1);
}

#[test]
fn test_closest() {
    let doc = load(FOOD);
    let orange = select(&doc, ".orange");
    assert!(orange.closest(None).unwrap().is_empty());
    assert!(orange.closest(Some(".apple")).unwrap().is_empty());
    assert_eq!(labels(&orange.closest(Some("#food")).unwrap()), ["food"]);
    assert_eq!(labels(&orange.closest(Some("ul")).unwrap()), ["fruits"]);
    assert_eq!(labels(&orange.closest(Some("li")).unwrap()), ["orange"]);
    assert_eq!(select(&doc, "li").closest(Some("ul")).unwrap().len(), 2);
    assert!(select(&doc, ".saladbar").closest(Some("ul")).unwrap().is_empty());
}

// ============================================================================
// ITERATION
// ============================================================================

#[test]
fn test_each_passes_index_and_node() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let mut seen = Vec::new();
    li.each(|index, n| seen.push((index, doc.attr(n, "class").unwrap())));
    assert_eq!(
        seen,
        [(0, "apple".to_string()), (1, "orange".to_string()), (2, "pear".to_string())]
    );
}

#[test]
fn test_each_stops_on_false() {
    let doc = load(FRUITS);
    let mut count = 0;
    select(&doc, "li").each(|index, _| {
        count += 1;
        index < 1
    });
    assert_eq!(count, 2);

    let mut count = 0;
    select(&doc, "li").each(|_, _| {
        count += 1;
        Flow::Continue
    });
    assert_eq!(count, 3);
}

#[test]
fn test_iterate_selection() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let mut classes = Vec::new();
    for n in &li {
        classes.push(doc.attr(n, "class").unwrap());
    }
    assert_eq!(classes, ["apple", "orange", "pear"]);
}

#[test]
fn test_map_arguments() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let args = li.map(|index, n| Some((index, n)));
    assert_eq!(
        args.items(),
        [(0, li.get(0).unwrap()), (1, li.get(1).unwrap()), (2, li.get(2).unwrap())]
    );
}

#[test]
fn test_map_to_nodes() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let reversed = li
        .map(|index, _| li.get(2 - index as isize))
        .into_selection()
        .unwrap();
    assert_eq!(labels(&reversed), ["pear", "orange", "apple"]);
    assert!(reversed.end().ptr_eq(&li));
}

#[test]
fn test_map_skips_none() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let picks = [None, None, li.get(1)];
    let mapped = li.map(|index, _| picks[index]);
    assert_eq!(mapped.len(), 1);
    assert_eq!(mapped.get(0), li.get(1).as_ref());
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Num(i32),
    List(Vec<i32>),
}

#[test]
fn test_map_flattens_one_level() {
    let doc = load(FRUITS);
    let mapped: Mapped<Value> =
        select(&doc, "li").map(|_, _| vec![Value::Num(1), Value::List(vec![3, 4])]);
    let one = [Value::Num(1), Value::List(vec![3, 4])];
    assert_eq!(mapped.into_vec(), [one.clone(), one.clone(), one].concat());
}

#[test]
fn test_map_keeps_nested_none() {
    let doc = load(FRUITS);
    let mapped = select(&doc, "li").map(|_, _| vec![None::<NodeId>, None]);
    assert_eq!(mapped.len(), 6);
    assert!(mapped.iter().all(Option::is_none));
}

#[test]
fn test_mapped_nodes_deduplicate() {
    let doc = load(FRUITS);
    let parents = select(&doc, "li")
        .map(|_, n| doc.parent(n))
        .into_selection()
        .unwrap();
    assert_eq!(labels(&parents), ["fruits"]);
}

// ============================================================================
// FILTERING
// ============================================================================

#[test]
fn test_filter() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    assert_eq!(li.filter(".pear").unwrap().text(), "Pear");
    assert!(select(&doc, "#fruits").filter("li").unwrap().is_empty());

    let some = li.filter(".pear, .apple").unwrap();
    assert_eq!(li.filter(&some).unwrap().len(), 2);

    let pear = some.get(-1).unwrap();
    assert_eq!(labels(&li.filter(pear).unwrap()), ["pear"]);
}

#[test]
fn test_filter_predicate() {
    let doc = load(FRUITS);
    let orange = select(&doc, "li")
        .filter(Matcher::predicate(|_, n| {
            assert_eq!(doc.tag_name(n).as_deref(), Some("li"));
            doc.attr(n, "class").as_deref() == Some("orange")
        }))
        .unwrap();
    assert_eq!(orange.text(), "Orange");
}

#[test]
fn test_not() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    assert_eq!(labels(&li.not(".pear").unwrap()), ["apple", "orange"]);
    assert_eq!(select(&doc, "#fruits").not("li").unwrap().len(), 1);
    assert_eq!(labels(&li.not(&select(&doc, ".orange")).unwrap()), ["apple", "pear"]);
    assert_eq!(labels(&li.not(node(&doc, ".apple")).unwrap()), ["orange", "pear"]);

    let not_orange = li
        .not(Matcher::predicate(|_, n| {
            doc.attr(n, "class").as_deref() == Some("orange")
        }))
        .unwrap();
    assert_eq!(labels(&not_orange), ["apple", "pear"]);
}

#[test]
fn test_filter_rejects_markup() {
    let doc = load(FRUITS);
    let err = select(&doc, "li").filter("<li>x</li>").unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn test_is() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    assert!(li.is(".pear").unwrap());
    assert!(!li.is("ul").unwrap());
    assert!(!doc.empty().is("li").unwrap());
}

#[test]
fn test_has() {
    let doc = load(FOOD);
    let lists = select(&doc, "#fruits,#vegetables");
    assert_eq!(labels(&lists.has(".pear").unwrap()), ["fruits"]);
    assert!(select(&doc, "#fruits").has("#fruits").unwrap().is_empty());
    assert_eq!(labels(&lists.has(node(&doc, ".pear")).unwrap()), ["fruits"]);

    let fruits = select(&doc, "#fruits");
    assert!(fruits.has(fruits.get(0).unwrap()).unwrap().is_empty());
    assert_eq!(select(&doc, "ul").has("> .carrot").unwrap().len(), 1);
}

// ============================================================================
// POSITIONS
// ============================================================================

#[test]
fn test_first_and_last() {
    let doc = load(FRUITS);
    let spans = doc.fragment("<span>foo</span><span>bar</span><span>baz</span>").unwrap();
    assert_eq!(spans.first().text(), "foo");
    assert_eq!(spans.last().text(), "baz");

    let one = doc.fragment("<span>bar</span>").unwrap();
    assert_eq!(one.first().get(0), one.last().get(0));

    assert!(doc.empty().first().get(0).is_none());
    assert!(doc.empty().last().is_empty());
}

#[test]
fn test_eq() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    assert_eq!(li.eq(0).text(), "Apple");
    assert_eq!(li.eq(1).text(), "Orange");
    assert_eq!(li.eq(2).text(), "Pear");
    assert!(li.eq(3).is_empty());
    assert_eq!(li.eq(-1).text(), "Pear");
}

#[test]
fn test_get() {
    let doc = load(FRUITS);
    let children = select(&doc, "#fruits").children(None).unwrap();
    let all = children.to_vec();
    assert_eq!(all.len(), 3);
    assert_eq!(children.get(0), Some(all[0]));
    assert_eq!(children.get(2), Some(all[2]));
    assert_eq!(children.get(-1), Some(all[2]));
    assert_eq!(children.get(-2), Some(all[1]));
    assert_eq!(children.get(-3), Some(all[0]));
}

#[test]
fn test_index() {
    let doc = load(FRUITS);
    assert_eq!(select(&doc, ".orange").index(), Some(1));
    assert_eq!(doc.fragment("<div/>").unwrap().index(), None);
}

#[test]
fn test_index_of_selector() {
    let doc = load(FRUITS);
    let apple = select(&doc, ".apple");
    assert_eq!(apple.index_of("#fruits, li").unwrap(), Some(1));
    assert_eq!(apple.index_of("#fuits").unwrap(), None);
    assert_eq!(doc.fragment("<div/>").unwrap().index_of("*").unwrap(), None);
}

#[test]
fn test_index_of_nodes() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let fruits = node(&doc, "#fruits");
    assert_eq!(li.index_of(li.get(1).unwrap()).unwrap(), Some(1));
    assert_eq!(li.index_of(fruits).unwrap(), None);
    assert_eq!(select(&doc, ".not-fruit").index_of(fruits).unwrap(), None);

    let detached = doc.fragment("<li>kiwi</li>").unwrap();
    assert_eq!(detached.index_of(detached.get(0).unwrap()).unwrap(), Some(0));

    assert_eq!(li.index_of(&select(&doc, ".orange, .pear")).unwrap(), Some(1));
    assert_eq!(li.index_of(&select(&doc, "#fruits")).unwrap(), None);
    assert_eq!(select(&doc, ".not-fruit").index_of(&select(&doc, "#fruits")).unwrap(), None);
}

#[test]
fn test_slice() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    assert_eq!(labels(&li.slice(1, None)), ["orange", "pear"]);
    assert_eq!(labels(&li.slice(1, Some(2))), ["orange"]);
    assert_eq!(labels(&li.slice(-1, None)), ["pear"]);
}

// ============================================================================
// CHAIN HISTORY
// ============================================================================

#[test]
fn test_end_past_chain_start_is_empty() {
    let doc = load(FRUITS);
    let fruits = select(&doc, "#fruits").children(None).unwrap();
    let gone = fruits.end().end().end();
    assert!(gone.is_empty());
}

#[test]
fn test_end_returns_the_source_selection() {
    let doc = load(FRUITS);
    let fruits = select(&doc, "#fruits").children(None).unwrap();

    let derived = [
        fruits.find(".apple").unwrap(),
        fruits.filter(".apple").unwrap(),
        fruits.contents(),
        fruits.eq(1),
        fruits.first(),
        fruits.last(),
        fruits.slice(1, None),
        fruits.children(None).unwrap(),
        fruits.parent(None).unwrap(),
        fruits.parents(None).unwrap(),
        fruits.closest(Some("ul")).unwrap(),
        fruits.siblings(None).unwrap(),
        fruits.next(None).unwrap(),
        fruits.next_all(None).unwrap(),
        fruits.prev(None).unwrap(),
        fruits.prev_all(None).unwrap(),
        fruits.has("li").unwrap(),
        fruits.add(".apple").unwrap(),
    ];
    for sel in &derived {
        assert!(sel.end().ptr_eq(&fruits));
    }
    assert!(fruits.map(|_, n| Some(n)).end().ptr_eq(&fruits));
}

// ============================================================================
// UNIONS
// ============================================================================

struct Food {
    doc: Document,
    fruits: Selection,
    apple: Selection,
    orange: Selection,
    pear: Selection,
}

fn food() -> Food {
    let doc = load(FOOD);
    Food {
        fruits: select(&doc, "#fruits"),
        apple: select(&doc, ".apple"),
        orange: select(&doc, ".orange"),
        pear: select(&doc, ".pear"),
        doc,
    }
}

#[test]
fn test_add_selector_sorts_into_document_order() {
    let f = food();
    assert_eq!(labels(&f.orange.add(".apple").unwrap()), ["apple", "orange"]);
    assert_eq!(labels(&f.orange.add(".orange").unwrap()), ["orange"]);
    assert_eq!(labels(&f.orange.add(".pear").unwrap()), ["orange", "pear"]);
    assert_eq!(labels(&f.orange.add("#fruits").unwrap()), ["fruits", "orange"]);
    assert_eq!(labels(&f.fruits.add(".orange").unwrap()), ["fruits", "orange"]);

    assert_eq!(labels(&f.pear.add(".apple, .orange").unwrap()), ["apple", "orange", "pear"]);
    assert_eq!(labels(&f.pear.add("#fruits li").unwrap()), ["apple", "orange", "pear"]);
    assert_eq!(labels(&f.apple.add(".orange, .pear").unwrap()), ["apple", "orange", "pear"]);
    assert_eq!(
        labels(&f.fruits.add("#fruits li").unwrap()),
        ["fruits", "apple", "orange", "pear"]
    );
}

#[test]
fn test_add_in_context() {
    let f = food();
    assert_eq!(
        labels(&f.fruits.add_in("li", "#vegetables").unwrap()),
        ["fruits", "carrot", "sweetcorn"]
    );
}

#[test]
fn test_add_node() {
    let f = food();
    let apple = f.apple.get(0).unwrap();
    assert_eq!(labels(&f.orange.add(apple).unwrap()), ["apple", "orange"]);
    assert_eq!(labels(&f.orange.add(f.pear.get(0).unwrap()).unwrap()), ["orange", "pear"]);
    assert_eq!(labels(&f.fruits.add(f.orange.get(0).unwrap()).unwrap()), ["fruits", "orange"]);
    assert_eq!(labels(&f.orange.add(f.fruits.get(0).unwrap()).unwrap()), ["fruits", "orange"]);
    assert_eq!(labels(&f.apple.add(apple).unwrap()), ["apple"]);
}

#[test]
fn test_add_nodes() {
    let f = food();
    let nodes = select(&f.doc, ".apple, .orange").to_vec();
    assert_eq!(labels(&f.pear.add(&nodes).unwrap()), ["apple", "orange", "pear"]);

    let nodes = select(&f.doc, "#fruits li").to_vec();
    assert_eq!(labels(&f.pear.add(&nodes).unwrap()), ["apple", "orange", "pear"]);
    assert_eq!(
        labels(&f.fruits.add(&nodes).unwrap()),
        ["fruits", "apple", "orange", "pear"]
    );

    let nodes = select(&f.doc, ".orange, .pear").to_vec();
    assert_eq!(labels(&f.apple.add(&nodes).unwrap()), ["apple", "orange", "pear"]);
}

#[test]
fn test_add_markup() {
    let f = food();
    let both = f.apple.add(r#"<li class="banana">banana</li>"#).unwrap();
    assert_eq!(both.len(), 2);
    assert!(both.is(".apple").unwrap());
    assert!(both.is(".banana").unwrap());
}

#[test]
fn test_add_table_row_markup() {
    let f = food();
    let both = f.apple.add("<tr><td>x</td></tr>").unwrap();
    assert_eq!(labels(&both), ["apple", "tr"]);
    assert_eq!(labels(&both.last().children(None).unwrap()), ["td"]);
}

#[test]
fn test_add_selection() {
    let f = food();
    let doc = &f.doc;
    assert_eq!(labels(&f.orange.add(&select(doc, ".apple")).unwrap()), ["apple", "orange"]);
    assert_eq!(labels(&f.orange.add(&select(doc, ".orange")).unwrap()), ["orange"]);
    assert_eq!(labels(&f.orange.add(&select(doc, ".pear")).unwrap()), ["orange", "pear"]);
    assert_eq!(labels(&f.orange.add(&select(doc, "#fruits")).unwrap()), ["fruits", "orange"]);
    assert_eq!(labels(&f.fruits.add(&select(doc, ".orange")).unwrap()), ["fruits", "orange"]);
    assert_eq!(
        labels(&f.pear.add(&select(doc, ".apple, .orange")).unwrap()),
        ["apple", "orange", "pear"]
    );
    assert_eq!(
        labels(&f.fruits.add(&select(doc, "#fruits li")).unwrap()),
        ["fruits", "apple", "orange", "pear"]
    );
}

#[test]
fn test_add_rejects_foreign_input() {
    let f = food();
    let other = load(FOOD);
    let err = f.apple.add(&select(&other, ".pear")).unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));

    let err = f.apple.add(NodeId::from_index(1_000_000)).unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn test_add_back() {
    let doc = load(FOOD);
    assert_eq!(
        labels(&select(&doc, ".orange").siblings(None).unwrap().add_back(None).unwrap()),
        ["apple", "orange", "pear"]
    );
    assert_eq!(
        labels(&select(&doc, "#fruits").children(None).unwrap().add_back(None).unwrap()),
        ["fruits", "apple", "orange", "pear"]
    );
    assert_eq!(
        labels(&select(&doc, ".apple").parent(None).unwrap().add_back(None).unwrap()),
        ["fruits", "apple"]
    );
    assert_eq!(
        labels(&select(&doc, ".apple").parents(None).unwrap().add_back(None).unwrap()),
        ["html", "body", "food", "fruits", "apple"]
    );
}

#[test]
fn test_add_back_filters_previous() {
    let doc = load(FRUITS);
    let both = select(&doc, "li").eq(1).add_back(Some(".apple")).unwrap();
    assert_eq!(labels(&both), ["apple", "orange"]);
}

// ============================================================================
// INVARIANTS
// ============================================================================

#[test]
fn test_overlapping_ranges_never_repeat() {
    let doc = load(DRINKS);
    let li = select(&doc, "li");
    let results = [
        li.next_all(None).unwrap(),
        li.prev_all(None).unwrap(),
        li.siblings(None).unwrap(),
        li.next_until(".cider", None).unwrap(),
        li.parents(None).unwrap(),
        li.closest(Some("ul")).unwrap(),
        li.add(&li).unwrap(),
    ];
    for sel in &results {
        let mut seen = sel.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), sel.len());
    }
}

#[test]
fn test_derived_selections_do_not_touch_the_source() {
    let doc = load(FRUITS);
    let li = select(&doc, "li");
    let before = li.to_vec();
    let _ = li.filter(".apple").unwrap();
    let _ = li.add("#fruits").unwrap();
    assert_eq!(li.to_vec(), before);
}
