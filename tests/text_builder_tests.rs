mod common;

use std::sync::Arc;

use freedom_within::glow::{GLOW_COLOR, GLOW_OPACITY, GLOW_SCALE};
use freedom_within::scene::text::{build_text_geometry, FREEDOM_TEXT, WITHIN_TEXT};
use freedom_within::scene::{Material, FREEDOM_STYLE, WITHIN_STYLE};
use glam::Vec3;

use common::{block_font, scene_with_particles};

#[cfg(test)]
mod text_builder_tests {
    use super::*;

    #[test]
    fn test_scene_starts_without_text() {
        let scene = scene_with_particles(10);
        assert!(!scene.has_text());
        assert_eq!(scene.mesh_nodes().count(), 0);
    }

    #[test]
    fn test_attach_text_adds_three_nodes() {
        let mut scene = scene_with_particles(10);
        assert!(scene.attach_text(&block_font()));
        assert!(scene.has_text());

        let nodes: Vec<_> = scene.mesh_nodes().collect();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| !n.geometry.is_empty()));
    }

    #[test]
    fn test_second_attach_is_ignored() {
        let mut scene = scene_with_particles(10);
        let font = block_font();
        assert!(scene.attach_text(&font));
        let first = Arc::clone(&scene.text.as_ref().unwrap().freedom.geometry);

        assert!(!scene.attach_text(&font));
        assert!(Arc::ptr_eq(&first, &scene.text.as_ref().unwrap().freedom.geometry));
    }

    #[test]
    fn test_freedom_is_centered_at_origin() {
        let mut scene = scene_with_particles(10);
        scene.attach_text(&block_font());
        let text = scene.text.as_ref().unwrap();

        assert_eq!(text.freedom.transform.position, Vec3::ZERO);
        let center = text.freedom.geometry.bounding_box().unwrap().center();
        assert!(center.length() < 1e-4, "center {:?}", center);
    }

    #[test]
    fn test_within_geometry_is_centered() {
        let mesh = build_text_geometry(&block_font(), WITHIN_TEXT, &WITHIN_STYLE);
        let center = mesh.bounding_box().unwrap().center();
        assert!(center.length() < 1e-4, "center {:?}", center);
    }

    #[test]
    fn test_freedom_extent_includes_bevel() {
        let mesh = build_text_geometry(&block_font(), FREEDOM_TEXT, &FREEDOM_STYLE);
        let size = mesh.bounding_box().unwrap().size();

        // Seven 700-unit advances, last glyph 600 wide, at 0.8 / 1000 per unit
        assert!((size.x - (4800.0 * 0.0008 + 0.06)).abs() < 1e-3, "size {:?}", size);
        assert!((size.y - (700.0 * 0.0008 + 0.06)).abs() < 1e-3, "size {:?}", size);
        assert!((size.z - 0.38).abs() < 1e-4, "size {:?}", size);
    }

    #[test]
    fn test_glow_shares_within_geometry() {
        let mut scene = scene_with_particles(10);
        scene.attach_text(&block_font());
        let text = scene.text.as_ref().unwrap();

        assert!(Arc::ptr_eq(&text.within.geometry, &text.glow.geometry));
        assert!(!Arc::ptr_eq(&text.freedom.geometry, &text.within.geometry));
        assert_eq!(text.glow.transform.scale, GLOW_SCALE);
        assert_eq!(text.within.transform.scale, 1.0);
    }

    #[test]
    fn test_materials() {
        let mut scene = scene_with_particles(10);
        scene.attach_text(&block_font());
        let text = scene.text.as_ref().unwrap();

        assert!(matches!(text.freedom.material, Material::Phong { color: 0x0000ff, .. }));
        assert!(matches!(text.within.material, Material::Phong { color: 0xff0000, .. }));
        match text.glow.material {
            Material::Glow(glow) => {
                assert_eq!(glow.color, GLOW_COLOR);
                assert_eq!(glow.opacity, GLOW_OPACITY);
            }
            other => panic!("expected glow material, got {:?}", other),
        }
    }
}
