//! Example: walking and restyling a parsed list
//!
//! Run with `RUST_LOG=trellis_query=trace` to see every traversal step.

use tracing_subscriber::EnvFilter;
use trellis_query::Document;

const FOOD: &str = r#"
<ul id="food">
  <ul id="fruits"><li class="apple">Apple</li><li class="orange">Orange</li><li class="pear">Pear</li></ul>
  <ul id="vegetables"><li class="carrot">Carrot</li><li class="sweetcorn">Sweetcorn</li></ul>
</ul>"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = Document::load(FOOD)?;

    let orange = doc.select(".orange")?;
    let ancestors = orange.parents(None)?;
    println!("{} ancestors above .orange", ancestors.len());

    let lists = doc.select("ul")?.has(".carrot")?;
    for node in &lists {
        println!("list containing a carrot: #{}", doc.attr(node, "id").unwrap_or_default());
    }

    let produce = orange.next_all(None)?.add_back(None)?.add(".carrot")?;
    produce.set_css("color", "green").set_css("font-weight", "bold");
    println!("{} items restyled", produce.len());
    println!("pear style: {:?}", doc.select(".pear")?.attr("style"));

    let names = doc.select("li")?.map(|_, node| Some(doc.text(node)));
    println!("all items: {}", names.items().join(", "));

    Ok(())
}
