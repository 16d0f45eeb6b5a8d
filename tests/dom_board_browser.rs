#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use blockdrag::config::OPTIONS_ATTRIBUTE;
use blockdrag::container::attached_container_rect;
use blockdrag::DomBoard;
use blockdrag_core::{
    Block, BoardHooks, BoardOptions, CollisionMode, CollisionRegistry, PointerSample,
};
use wasm_bindgen_test::*;
use web_sys::{window, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_container(options: Option<&str>) -> Element {
    blockdrag::install_panic_hook();
    let document = window()
        .and_then(|window| window.document())
        .expect("document");
    let element = document.create_element("div").expect("div");
    element
        .set_attribute(
            "style",
            "position: absolute; left: 0; top: 0; width: 300px; height: 200px;",
        )
        .expect("style");
    if let Some(options) = options {
        element
            .set_attribute(OPTIONS_ATTRIBUTE, options)
            .expect("options attribute");
    }
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

fn blocks() -> Vec<Block> {
    vec![
        Block::new(1, 10.0, 10.0, 50.0, 50.0),
        Block::new(2, 200.0, 10.0, 50.0, 50.0),
    ]
}

#[wasm_bindgen_test]
fn container_rect_reads_layout() {
    let element = mount_container(None);
    let rect = attached_container_rect(Some(&element)).expect("rect");
    assert_eq!(rect.client_width, 300.0);
    assert_eq!(rect.client_height, 200.0);
    element.remove();
}

#[wasm_bindgen_test]
fn attach_reads_options_attribute() {
    let element = mount_container(Some(r#"{"rotate":{"collision":{"enabled":true,"mode":"circle"}}}"#));
    let board: DomBoard<Block> = DomBoard::attach(
        element.clone(),
        CollisionRegistry::shared(),
        BoardHooks::empty(),
    );
    let options = board.options();
    assert!(options.rotate.collision.enabled);
    assert_eq!(options.rotate.collision.mode, CollisionMode::Circle);
    element.remove();
}

#[wasm_bindgen_test]
fn broken_options_fall_back_to_defaults() {
    let element = mount_container(Some("{not json"));
    let board: DomBoard<Block> = DomBoard::attach(
        element.clone(),
        CollisionRegistry::shared(),
        BoardHooks::empty(),
    );
    assert_eq!(board.options(), BoardOptions::default());
    element.remove();
}

#[wasm_bindgen_test]
fn drag_start_captures_until_unmount() {
    let element = mount_container(None);
    let board = DomBoard::new(
        Some(element.clone()),
        BoardOptions::default(),
        CollisionRegistry::shared(),
        BoardHooks::empty(),
    );
    board.set_blocks(blocks());
    let notified = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&notified);
    let _sub = board.subscribe(Rc::new(move || *seen.borrow_mut() += 1));

    let first = blocks()[0].clone();
    assert!(board.start_drag_at(&first, PointerSample::new(20.0, 20.0)));
    assert!(board.is_capturing());
    assert_eq!(*notified.borrow(), 1);
    assert_eq!(board.snapshot().dragging.map(|block| block.id), Some(1));

    let second = blocks()[1].clone();
    assert!(!board.start_drag_at(&second, PointerSample::new(210.0, 20.0)));

    board.unmount();
    assert!(!board.is_capturing());
    assert!(board.snapshot().dragging.is_none());
    element.remove();
}

#[wasm_bindgen_test]
fn rotate_needs_an_attached_container() {
    let board = DomBoard::new(
        None,
        BoardOptions::default(),
        CollisionRegistry::shared(),
        BoardHooks::empty(),
    );
    board.set_blocks(blocks());
    let first = blocks()[0].clone();
    assert!(!board.start_rotate_at(&first, PointerSample::new(20.0, 20.0)));
    assert!(!board.is_capturing());
}

#[wasm_bindgen_test]
fn boards_read_the_injected_registry() {
    let registry = CollisionRegistry::shared();
    let board: DomBoard<Block> = DomBoard::new(
        None,
        BoardOptions::default(),
        Rc::clone(&registry),
        BoardHooks::empty(),
    );
    registry.set_ids(vec![3, 1]);
    assert_eq!(board.collision_ids(), vec![1, 3]);
    assert!(Rc::ptr_eq(&board.registry(), &registry));
}
