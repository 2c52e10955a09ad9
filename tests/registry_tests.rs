use std::cell::RefCell;
use std::rc::Rc;

use radar_rs::animation::{AnimationOptions, Easing};
use radar_rs::api::{
    ChartEvent, ChartEventContext, ChartListener, ChartOptions, ChartRegistry, Container,
    TranslationCache,
};
use radar_rs::core::{BoundingBox, Category};

fn categories() -> Vec<Category> {
    ["safety", "quality", "efficiency", "teamwork", "communication"]
        .into_iter()
        .map(|id| Category::new(id, id.to_uppercase()))
        .collect()
}

fn container(id: &str) -> Option<Container> {
    Some(Container::new(id, BoundingBox::square(280.0)))
}

fn options() -> ChartOptions {
    ChartOptions::default().with_animation(AnimationOptions {
        enabled: true,
        duration_ms: 800.0,
        easing: Easing::Linear,
    })
}

struct CountingListener {
    events: Rc<RefCell<usize>>,
}

impl ChartListener for CountingListener {
    fn id(&self) -> &str {
        "counter"
    }

    fn on_event(&mut self, _event: ChartEvent, _context: ChartEventContext) {
        *self.events.borrow_mut() += 1;
    }
}

#[test]
fn creating_same_id_replaces_and_tears_down_previous_chart() {
    let mut registry = ChartRegistry::new();
    let events = Rc::new(RefCell::new(0));

    let first = registry.create_chart("team", container("a"), categories(), None, options());
    first
        .register_listener(Box::new(CountingListener {
            events: Rc::clone(&events),
        }))
        .expect("register");
    first.update_data_at(&[5.0; 5], 0.0).expect("update");
    let stale = first.pending_frame().expect("pending frame");
    let first_serial = first.serial();

    let second = registry.create_chart("team", container("b"), categories(), None, options());
    assert_ne!(second.serial(), first_serial);
    assert_eq!(registry.len(), 1);

    let seen = *events.borrow();
    assert!(!registry.on_frame("team", stale, 400.0));
    assert_eq!(*events.borrow(), seen);

    let chart = registry.get("team").expect("chart");
    assert_eq!(chart.listener_count(), 0);
    assert!(!chart.is_animating());
    assert_eq!(chart.container().map(Container::id), Some("b"));
}

#[test]
fn update_chart_ignores_unknown_ids_and_rejects_bad_lengths() {
    let mut registry = ChartRegistry::new();
    registry.create_chart("team", container("a"), categories(), None, options());

    assert!(!registry.update_chart("missing", &[1.0; 5]));
    assert!(!registry.update_chart("team", &[1.0; 3]));
    assert!(registry.update_chart("team", &[1.0; 5]));
    assert_eq!(
        registry.get("team").map(|chart| chart.committed_data().to_vec()),
        Some(vec![1.0; 5])
    );
}

#[test]
fn tick_all_drives_every_animating_chart() {
    let mut registry = ChartRegistry::new();
    registry.create_chart("a", container("a"), categories(), None, options());
    registry.create_chart("b", container("b"), categories(), None, options());
    registry.create_chart("idle", container("c"), categories(), None, options());
    registry
        .get_mut("a")
        .expect("a")
        .update_data_at(&[2.0; 5], 0.0)
        .expect("update a");
    registry
        .get_mut("b")
        .expect("b")
        .update_data_at(&[4.0; 5], 0.0)
        .expect("update b");

    assert_eq!(registry.pending_frames().len(), 2);
    assert_eq!(registry.tick_all(400.0), 2);
    assert_eq!(registry.get("a").expect("a").displayed_data(), &[1.0; 5]);
    assert_eq!(registry.tick_all(800.0), 2);
    assert_eq!(registry.tick_all(900.0), 0);
    assert_eq!(registry.get("b").expect("b").displayed_data(), &[4.0; 5]);
}

#[test]
fn at_most_one_tooltip_is_visible_across_charts() {
    let mut registry = ChartRegistry::new();
    registry.create_chart("a", container("a"), categories(), Some(vec![3.0; 5]), options());
    registry.create_chart("b", container("b"), categories(), Some(vec![4.0; 5]), options());

    registry.get_mut("a").expect("a").pointer_enter(0);
    let shown = registry.active_tooltip().expect("tooltip from a");
    assert_eq!(Some(shown.owner), registry.get("a").map(|chart| chart.serial()));

    registry.get_mut("b").expect("b").pointer_enter(2);
    let shown = registry.active_tooltip().expect("tooltip from b");
    assert_eq!(Some(shown.owner), registry.get("b").map(|chart| chart.serial()));
    assert!(registry.get("a").expect("a").tooltip().is_none());

    registry.get_mut("a").expect("a").pointer_leave(0);
    assert!(registry.active_tooltip().is_some());

    assert!(registry.destroy_chart("b"));
    assert!(registry.active_tooltip().is_none());
    assert!(!registry.destroy_chart("b"));
}

#[test]
fn translator_labels_fall_back_to_defaults() {
    let cache = Rc::new(TranslationCache::new(|key: &str| match key {
        "safety" => Some("Seguridad".to_owned()),
        "quality" => Some(String::new()),
        _ => None,
    }));
    let mut registry = ChartRegistry::with_translator(cache.clone());
    let chart = registry.create_chart("team", container("a"), categories(), None, options());

    let labels: Vec<String> = chart
        .scene()
        .and_then(|scene| scene.layer(radar_rs::render::SceneLayerKind::Labels))
        .map(|layer| layer.texts.iter().map(|text| text.text.clone()).collect())
        .unwrap_or_default();
    assert_eq!(
        labels,
        ["Seguridad", "QUALITY", "EFFICIENCY", "TEAMWORK", "COMMUNICATION"]
    );

    chart.resize(300.0).expect("resize");
    let stats = cache.stats();
    assert_eq!(stats.misses, 5);
    assert_eq!(stats.hits, 5);
}

#[test]
fn destroy_all_empties_registry() {
    let mut registry = ChartRegistry::new();
    registry.create_chart("a", container("a"), categories(), None, options());
    registry.create_chart("b", None, categories(), None, options());
    assert_eq!(registry.ids().collect::<Vec<_>>(), ["a", "b"]);
    assert!(registry.get("b").expect("b").is_inert());

    registry.destroy_all();
    assert!(registry.is_empty());
    assert!(!registry.contains("a"));
}
