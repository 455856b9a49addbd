//! Multi-type list example.
//!
//! Fills a list with text, image and rich items, registers one renderer per
//! item type and scrolls a small terminal "list view" through it, recycling
//! rows per kind.
//!
//! Run with: cargo run -p lattice-multitype --example normal
//! Set `RUST_LOG=lattice_multitype=trace` to watch visuals being created.

use std::collections::HashMap;
use std::sync::Arc;

use lattice_multitype::{CollectionAdapter, ItemAdapter, ItemRenderer, Items, Kind, VisualHandle};
use tracing_subscriber::EnvFilter;

/// Plain text line.
struct TextItem {
    content: String,
}

/// Image referenced by resource id.
struct ImageItem {
    resource: u32,
}

/// Text with an illustration.
struct RichItem {
    text: String,
    image: u32,
}

/// A terminal row: the lines drawn for one list position.
#[derive(Debug, Default)]
struct Row {
    lines: Vec<String>,
}

struct TextRenderer;

impl ItemRenderer for TextRenderer {
    type Item = TextItem;
    type Visual = Row;

    fn create_visual(&self) -> Row {
        Row::default()
    }

    fn bind_visual(&self, row: &mut Row, item: &TextItem, position: usize) {
        row.lines = vec![format!("{position:>3} | hello: {}", item.content)];
    }
}

struct ImageRenderer;

impl ItemRenderer for ImageRenderer {
    type Item = ImageItem;
    type Visual = Row;

    fn create_visual(&self) -> Row {
        Row::default()
    }

    fn bind_visual(&self, row: &mut Row, item: &ImageItem, position: usize) {
        row.lines = vec![
            format!("{position:>3} | +--------+"),
            format!("    | | img {:<4}|", item.resource),
            "    | +--------+".to_string(),
        ];
    }
}

struct RichRenderer;

impl ItemRenderer for RichRenderer {
    type Item = RichItem;
    type Visual = Row;

    fn create_visual(&self) -> Row {
        Row::default()
    }

    fn bind_visual(&self, row: &mut Row, item: &RichItem, position: usize) {
        row.lines = vec![
            format!("{position:>3} | [img {}]", item.image),
            format!("    | {}", item.text),
        ];
    }
}

/// A fixed-height terminal list that recycles rows by kind.
struct TerminalList {
    visible_rows: usize,
    attached: Vec<VisualHandle<Row>>,
    scrap: HashMap<Kind, Vec<VisualHandle<Row>>>,
    created: usize,
}

impl TerminalList {
    fn new(visible_rows: usize) -> Self {
        Self {
            visible_rows,
            attached: Vec::new(),
            scrap: HashMap::new(),
            created: 0,
        }
    }

    fn scroll_to<A>(&mut self, adapter: &A, first: usize) -> lattice_multitype::Result<()>
    where
        A: ItemAdapter<Visual = Row>,
    {
        for handle in self.attached.drain(..) {
            self.scrap.entry(handle.kind()).or_default().push(handle);
        }

        let end = (first + self.visible_rows).min(adapter.count());
        for position in first..end {
            let kind = adapter.kind_of(position)?;
            let mut handle = match self.scrap.get_mut(&kind).and_then(Vec::pop) {
                Some(handle) => handle,
                None => {
                    self.created += 1;
                    adapter.create_visual(kind)?
                }
            };
            adapter.bind_visual(&mut handle, position)?;
            self.attached.push(handle);
        }
        Ok(())
    }

    fn draw(&self) {
        for handle in &self.attached {
            for line in &handle.visual().lines {
                println!("{line}");
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut adapter = CollectionAdapter::new();
    adapter.register_type(TextRenderer)?;
    adapter.register_type(ImageRenderer)?;
    adapter.register_type(RichRenderer)?;

    let text = Arc::new(TextItem {
        content: "world".into(),
    });
    let image = Arc::new(ImageItem { resource: 1 });
    let rich = Arc::new(RichItem {
        text: "Little Ai is the best".into(),
        image: 11,
    });

    let mut items = Items::with_capacity(60);
    for _ in 0..20 {
        items.push_shared(Arc::clone(&text));
        items.push_shared(Arc::clone(&image));
        items.push_shared(Arc::clone(&rich));
    }
    adapter.set_items(items);

    let mut list = TerminalList::new(5);
    for first in [0, 5, 30, 55] {
        println!("=== rows {first}.. ===");
        list.scroll_to(&adapter, first)?;
        list.draw();
    }

    println!(
        "{} items drawn with {} visuals",
        adapter.item_count(),
        list.created
    );
    Ok(())
}
