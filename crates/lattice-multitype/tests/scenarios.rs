//! End-to-end scenarios driving the adapter the way a list surface does.

use std::collections::HashMap;
use std::sync::Arc;

use lattice_multitype::{
    CollectionAdapter, Error, Item, ItemAdapter, ItemRenderer, Items, Kind, Matcher, Renderer,
    TypeRegistry, VisualHandle,
};
use parking_lot::Mutex;

struct TextItem {
    text: String,
}

struct ImageItem {
    resource: u32,
}

struct RichItem {
    text: String,
    resource: u32,
}

struct Valued {
    value: i32,
}

/// What a renderer wrote into a visual.
#[derive(Debug, Default, Clone, PartialEq)]
struct Cell {
    content: String,
    position: Option<usize>,
}

/// Counts how many visuals each renderer created.
#[derive(Default)]
struct Stats {
    created: Mutex<HashMap<&'static str, usize>>,
}

impl Stats {
    fn record(&self, name: &'static str) {
        *self.created.lock().entry(name).or_default() += 1;
    }

    fn created(&self, name: &str) -> usize {
        self.created.lock().get(name).copied().unwrap_or(0)
    }
}

struct TextRenderer(Arc<Stats>);

impl ItemRenderer for TextRenderer {
    type Item = TextItem;
    type Visual = Cell;

    fn create_visual(&self) -> Cell {
        self.0.record("text");
        Cell::default()
    }

    fn bind_visual(&self, visual: &mut Cell, item: &TextItem, position: usize) {
        visual.content = item.text.clone();
        visual.position = Some(position);
    }
}

struct ImageRenderer(Arc<Stats>);

impl ItemRenderer for ImageRenderer {
    type Item = ImageItem;
    type Visual = Cell;

    fn create_visual(&self) -> Cell {
        self.0.record("image");
        Cell::default()
    }

    fn bind_visual(&self, visual: &mut Cell, item: &ImageItem, position: usize) {
        visual.content = format!("image:{}", item.resource);
        visual.position = Some(position);
    }
}

struct RichRenderer(Arc<Stats>);

impl ItemRenderer for RichRenderer {
    type Item = RichItem;
    type Visual = Cell;

    fn create_visual(&self) -> Cell {
        self.0.record("rich");
        Cell::default()
    }

    fn bind_visual(&self, visual: &mut Cell, item: &RichItem, position: usize) {
        visual.content = format!("{} ({})", item.text, item.resource);
        visual.position = Some(position);
    }
}

struct ValuedRenderer(&'static str);

impl ItemRenderer for ValuedRenderer {
    type Item = Valued;
    type Visual = Cell;

    fn create_visual(&self) -> Cell {
        Cell::default()
    }

    fn bind_visual(&self, visual: &mut Cell, item: &Valued, position: usize) {
        visual.content = format!("{}:{}", self.0, item.value);
        visual.position = Some(position);
    }
}

fn sample_adapter(stats: &Arc<Stats>) -> CollectionAdapter<Cell> {
    let mut adapter = CollectionAdapter::new();
    assert_eq!(
        adapter.register_type(TextRenderer(stats.clone())).unwrap(),
        Kind::new(0)
    );
    assert_eq!(
        adapter.register_type(ImageRenderer(stats.clone())).unwrap(),
        Kind::new(1)
    );
    assert_eq!(
        adapter.register_type(RichRenderer(stats.clone())).unwrap(),
        Kind::new(2)
    );
    adapter
}

/// A minimal recycling list: a fixed number of on-screen rows, with
/// off-screen visuals parked in a per-kind scrap pool.
struct RecyclingList {
    rows: usize,
    attached: Vec<VisualHandle<Cell>>,
    scrap: HashMap<Kind, Vec<VisualHandle<Cell>>>,
}

impl RecyclingList {
    fn new(rows: usize) -> Self {
        Self {
            rows,
            attached: Vec::new(),
            scrap: HashMap::new(),
        }
    }

    /// Lays out the window starting at `first`, reusing scrapped visuals.
    fn layout<A: ItemAdapter<Visual = Cell>>(
        &mut self,
        adapter: &A,
        first: usize,
    ) -> Result<(), Error> {
        for handle in self.attached.drain(..) {
            self.scrap.entry(handle.kind()).or_default().push(handle);
        }

        let last = (first + self.rows).min(adapter.count());
        for position in first..last {
            let kind = adapter.kind_of(position)?;
            let mut handle = match self.scrap.get_mut(&kind).and_then(Vec::pop) {
                Some(handle) => handle,
                None => adapter.create_visual(kind)?,
            };
            adapter.bind_visual(&mut handle, position)?;
            self.attached.push(handle);
        }
        Ok(())
    }

    fn contents(&self) -> Vec<String> {
        self.attached
            .iter()
            .map(|handle| handle.visual().content.clone())
            .collect()
    }
}

#[test]
fn test_text_image_rich_kinds() {
    let stats = Arc::new(Stats::default());
    let mut adapter = sample_adapter(&stats);

    let text = Arc::new(TextItem {
        text: "world".into(),
    });
    let mut items = Items::new();
    items.push_shared(text.clone());
    items.push(ImageItem { resource: 11 });
    items.push(RichItem {
        text: "hello".into(),
        resource: 12,
    });
    items.push_shared(text);
    adapter.set_items(items);

    assert_eq!(adapter.item_count(), 4);
    let kinds: Vec<Kind> = (0..4).map(|p| adapter.kind_at(p).unwrap()).collect();
    assert_eq!(kinds, vec![Kind::new(0), Kind::new(1), Kind::new(2), Kind::new(0)]);
}

#[test]
fn test_predicate_registered_before_exact_type_wins() {
    let mut adapter = CollectionAdapter::new();
    let positive = adapter
        .register_when(|item: &Valued| item.value > 0, ValuedRenderer("positive"))
        .unwrap();
    let exact = adapter.register_type(ValuedRenderer("any")).unwrap();
    assert_eq!((positive, exact), (Kind::new(0), Kind::new(1)));

    let mut items = Items::new();
    items.push(Valued { value: 5 });
    items.push(Valued { value: -5 });
    adapter.set_items(items);

    assert_eq!(adapter.kind_at(0).unwrap(), Kind::new(0));
    assert_eq!(adapter.kind_at(1).unwrap(), Kind::new(1));

    let mut handle = adapter.create_visual(Kind::new(0)).unwrap();
    adapter.bind_visual(&mut handle, 0).unwrap();
    assert_eq!(handle.visual().content, "positive:5");
}

#[test]
fn test_item_at_preserves_identity() {
    let stats = Arc::new(Stats::default());
    let mut adapter = sample_adapter(&stats);

    let source: Vec<Item> = vec![
        Item::new(TextItem { text: "a".into() }),
        Item::new(ImageItem { resource: 1 }),
        Item::new(TextItem { text: "b".into() }),
    ];
    adapter.set_items(source.clone());

    for (position, expected) in source.iter().enumerate() {
        assert!(adapter.item_at(position).unwrap().ptr_eq(expected));
    }
    assert_eq!(
        adapter.item_at(source.len()).unwrap_err(),
        Error::IndexOutOfRange {
            position: 3,
            count: 3
        }
    );
}

#[test]
fn test_boundaries() {
    let stats = Arc::new(Stats::default());
    let mut adapter = sample_adapter(&stats);
    assert_eq!(adapter.item_count(), 0);

    let mut items = Items::new();
    items.push(TextItem { text: "x".into() });
    adapter.set_items(items);

    assert!(matches!(
        adapter.kind_at(adapter.item_count()),
        Err(Error::IndexOutOfRange {
            position: 1,
            count: 1
        })
    ));
}

#[test]
fn test_unregistered_item_surfaces_on_query() {
    let stats = Arc::new(Stats::default());
    let mut adapter = sample_adapter(&stats);

    let mut items = Items::new();
    items.push(TextItem { text: "ok".into() });
    items.push(Valued { value: 1 });
    adapter.set_items(items);

    assert_eq!(adapter.item_count(), 2);
    assert_eq!(adapter.kind_at(0).unwrap(), Kind::new(0));
    match adapter.kind_at(1) {
        Err(Error::UnresolvedType {
            type_name,
            position: Some(1),
        }) => assert!(type_name.ends_with("Valued")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_recycling_creates_one_visual_per_slot() {
    let stats = Arc::new(Stats::default());
    let mut adapter = sample_adapter(&stats);

    let text = Arc::new(TextItem {
        text: "world".into(),
    });
    let image = Arc::new(ImageItem { resource: 7 });
    let rich = Arc::new(RichItem {
        text: "rich".into(),
        resource: 8,
    });
    let mut items = Items::with_capacity(60);
    for _ in 0..20 {
        items.push_shared(text.clone());
        items.push_shared(image.clone());
        items.push_shared(rich.clone());
    }
    adapter.set_items(items);

    let mut list = RecyclingList::new(6);
    for first in (0..adapter.item_count()).step_by(3) {
        list.layout(&adapter, first).unwrap();
    }

    assert_eq!(list.contents(), vec!["world", "image:7", "rich (8)"]);
    // Six rows of a period-three pattern need two visuals per kind.
    assert_eq!(stats.created("text"), 2);
    assert_eq!(stats.created("image"), 2);
    assert_eq!(stats.created("rich"), 2);
}

#[test]
fn test_stale_visual_is_rejected_after_replacement() {
    let stats = Arc::new(Stats::default());
    let mut adapter = sample_adapter(&stats);

    let mut items = Items::new();
    items.push(TextItem { text: "t".into() });
    adapter.set_items(items);
    let mut handle = adapter.create_visual(adapter.kind_at(0).unwrap()).unwrap();
    adapter.bind_visual(&mut handle, 0).unwrap();

    let mut replaced = Items::new();
    replaced.push(ImageItem { resource: 2 });
    adapter.set_items(replaced);

    assert_eq!(
        adapter.bind_visual(&mut handle, 0).unwrap_err(),
        Error::VisualKindMismatch {
            expected: Kind::new(0),
            actual: Kind::new(1),
            position: 0
        }
    );
    assert_eq!(handle.visual().content, "t");
}

#[test]
fn test_mismatched_renderer_reports_item_type() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            Matcher::exact::<ImageItem>(),
            Renderer::typed(ValuedRenderer("wrong")),
        )
        .unwrap();

    let mut adapter = CollectionAdapter::with_registry(registry);
    let mut items = Items::new();
    items.push(ImageItem { resource: 4 });
    adapter.set_items(items);

    let mut handle = adapter.create_visual(Kind::new(0)).unwrap();
    match adapter.bind_visual(&mut handle, 0) {
        Err(Error::ItemTypeMismatch {
            expected,
            position: 0,
        }) => assert!(expected.ends_with("Valued")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_shared_registry_across_adapters() {
    let stats = Arc::new(Stats::default());
    let mut shared = TypeRegistry::new();
    shared.register_type(ImageRenderer(stats.clone())).unwrap();

    let mut first = CollectionAdapter::new();
    first.register_type(TextRenderer(stats.clone())).unwrap();
    first.register_all(&shared).unwrap();

    let second = CollectionAdapter::with_registry(shared.clone());

    // Kinds are scoped to each registry instance.
    assert_eq!(first.registry().kind_of_type::<ImageItem>(), Some(Kind::new(1)));
    assert_eq!(second.registry().kind_of_type::<ImageItem>(), Some(Kind::new(0)));
}
