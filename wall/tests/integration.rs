use wall::{AtomicBlock, Block, Composite, Structure, Wall};

fn wood() -> Box<dyn Block> {
    Box::new(AtomicBlock::new("red", "wood"))
}

fn metal() -> Box<dyn Block> {
    Box::new(AtomicBlock::new("silver", "metal"))
}

fn custom(color: &str, material: &str) -> Box<dyn Block> {
    Box::new(AtomicBlock::new(color, material))
}

fn brick() -> Box<dyn Block> {
    Box::new(Composite::new("red-silver", "metal-wood", vec![metal(), wood()]))
}

fn composite(color: &str, material: &str, blocks: Vec<Box<dyn Block>>) -> Box<dyn Block> {
    Box::new(Composite::new(color, material, blocks))
}

fn attrs(block: &dyn Block) -> (&str, &str) {
    (block.color(), block.material())
}

#[test]
fn count_atomic_blocks() {
    let wall = Wall::new(vec![wood(), metal(), wood()]);
    assert_eq!(wall.count(), 3);
}

#[test]
fn count_composite_as_single_block() {
    let wall = Wall::new(vec![brick()]);
    assert_eq!(wall.count(), 1);
}

#[test]
fn count_composites_not_their_children() {
    let mixed = composite("mixed", "mixed", vec![wood(), wood(), wood()]);
    let wall = Wall::new(vec![brick(), mixed]);
    assert_eq!(wall.count(), 2);
}

#[test]
fn count_mixed_wall() {
    let wall = Wall::new(vec![metal(), wood(), brick()]);
    assert_eq!(wall.count(), 3);
}

#[test]
fn count_empty_wall() {
    let wall = Wall::new(Vec::new());
    assert_eq!(wall.count(), 0);
    assert!(wall.is_empty());
    assert!(wall.find_block_by_color("red").is_none());
    assert!(wall.find_blocks_by_material("wood").is_empty());
}

#[test]
fn find_by_color() {
    let wall = Wall::new(vec![metal(), wood(), brick()]);
    for color in ["red", "red-silver"] {
        let found = wall.find_block_by_color(color).expect("color should be present");
        assert_eq!(found.color(), color);
    }
}

#[test]
fn find_composite_by_its_own_color() {
    let wall = Wall::new(vec![metal(), wood(), brick()]);
    let found = wall.find_block_by_color("red-silver").unwrap();
    assert_eq!(attrs(found), ("red-silver", "metal-wood"));
    assert_eq!(found.as_composite().map(|c| c.blocks().len()), Some(2));
}

#[test]
fn find_by_color_does_not_look_inside_composites() {
    let wall = Wall::new(vec![brick()]);
    assert!(wall.find_block_by_color("silver").is_none());
    assert!(wall.find_block_by_color("red").is_none());

    let wall = Wall::new(vec![brick(), metal()]);
    let found = wall.find_block_by_color("silver").unwrap();
    assert_eq!(attrs(found), ("silver", "metal"));
    assert!(found.as_composite().is_none());
}

#[test]
fn find_first_block_when_colors_repeat() {
    let wall = Wall::new(vec![custom("red", "concrete"), metal(), wood(), brick()]);
    let found = wall.find_block_by_color("red").unwrap();
    assert_eq!(attrs(found), ("red", "concrete"));
}

#[test]
fn find_by_color_is_case_sensitive() {
    let wall = Wall::new(vec![wood()]);
    assert!(wall.find_block_by_color("Red").is_none());
}

#[test]
fn missing_color_is_absent() {
    let wall = Wall::new(vec![metal(), wood(), brick()]);
    assert!(wall.find_block_by_color("ugly").is_none());
}

#[test]
fn empty_color_matches_only_empty_color() {
    let wall = Wall::new(vec![wood(), custom("", "glass")]);
    let found = wall.find_block_by_color("").unwrap();
    assert_eq!(attrs(found), ("", "glass"));

    let wall = Wall::new(vec![wood()]);
    assert!(wall.find_block_by_color("").is_none());
}

#[test]
fn find_by_material() {
    let wall = Wall::new(vec![custom("red", "sand"), custom("yellow", "sand"), brick()]);
    let found = wall.find_blocks_by_material("sand");
    assert_eq!(found.len(), 2);
    assert_eq!(attrs(found[0]), ("red", "sand"));
    assert_eq!(attrs(found[1]), ("yellow", "sand"));
}

#[test]
fn find_composites_by_material_ignoring_children() {
    let first = composite("red", "sand", vec![wood()]);
    let second = composite("yellow", "sand", vec![wood(), metal()]);
    let wall = Wall::new(vec![first, second, brick()]);

    let found = wall.find_blocks_by_material("sand");
    assert_eq!(found.len(), 2);
    assert_eq!(attrs(found[0]), ("red", "sand"));
    assert_eq!(attrs(found[1]), ("yellow", "sand"));

    assert!(wall.find_blocks_by_material("wood").is_empty());
    assert!(wall.find_blocks_by_material("metal").is_empty());
}

#[test]
fn find_by_material_preserves_order() {
    let wall = Wall::new(vec![
        custom("a", "stone"),
        wood(),
        custom("b", "stone"),
        brick(),
        custom("c", "stone"),
    ]);
    let colors: Vec<&str> = wall
        .find_blocks_by_material("stone")
        .into_iter()
        .map(|block| block.color())
        .collect();
    assert_eq!(colors, ["a", "b", "c"]);
}

#[test]
fn missing_material_is_empty() {
    let wall = Wall::new(vec![metal(), wood(), brick()]);
    assert!(wall.find_blocks_by_material("sand").is_empty());
}

#[test]
fn composite_children_are_retained() {
    let wall = Wall::new(vec![brick()]);
    let brick = wall.blocks()[0].as_composite().unwrap();
    let children: Vec<(&str, &str)> = brick.blocks().iter().map(|b| attrs(b.as_ref())).collect();
    assert_eq!(children, [("silver", "metal"), ("red", "wood")]);
}

#[test]
fn nested_composite_counts_once() {
    let inner = composite("red-silver", "metal-wood", vec![metal(), wood()]);
    let outer = composite("grey", "mortar", vec![inner, wood()]);
    let wall = Wall::new(vec![outer]);
    assert_eq!(wall.count(), 1);
    assert!(wall.find_block_by_color("red-silver").is_none());
    assert!(wall.find_blocks_by_material("metal-wood").is_empty());
}

#[test]
fn collect_into_wall() {
    let wall: Wall = vec![wood(), metal()].into_iter().collect();
    assert_eq!(wall.count(), 2);
    assert_eq!(attrs(wall.blocks()[1].as_ref()), ("silver", "metal"));
}

#[derive(Debug)]
struct Pane {
    tint: &'static str,
}

impl Block for Pane {
    fn color(&self) -> &str {
        self.tint
    }

    fn material(&self) -> &str {
        "glass"
    }
}

#[derive(Debug)]
struct Unreadable;

impl Block for Unreadable {
    fn color(&self) -> &str {
        panic!("color read past the first match")
    }

    fn material(&self) -> &str {
        panic!("material read on an unreadable block")
    }
}

#[test]
fn find_by_color_stops_at_first_match() {
    let unreadable: Box<dyn Block> = Box::new(Unreadable);
    let wall = Wall::new(vec![metal(), wood(), unreadable]);
    let found = wall.find_block_by_color("red").unwrap();
    assert_eq!(attrs(found), ("red", "wood"));
    assert_eq!(wall.count(), 3);
}

#[test]
fn caller_defined_blocks() {
    let pane: Box<dyn Block> = Box::new(Pane { tint: "blue" });
    let wall = Wall::new(vec![pane, wood()]);
    let found = wall.find_block_by_color("blue").unwrap();
    assert_eq!(found.material(), "glass");
    assert_eq!(wall.find_blocks_by_material("glass").len(), 1);
}

#[test]
fn wall_is_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Wall>();

    let wall = std::sync::Arc::new(Wall::new(vec![wood(), metal(), brick()]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let wall = wall.clone();
            std::thread::spawn(move || wall.find_blocks_by_material("metal").len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
