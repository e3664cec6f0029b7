use glam::{Mat4, Vec3};

use crate::errors::{Result, SceneryError};
use crate::scene::{BatchKey, InstanceBatches, Node, NodeHandle, Scene};
use crate::settings::TownSettings;

pub const HOUSE_BODY_MODEL: &str = "res/models/house/body/body.obj";
pub const HOUSE_ROOF_MODEL: &str = "res/models/house/roof/roof.obj";

/// The procedural house grid.
#[derive(Debug, Clone)]
pub struct Town {
    /// Group node every row hangs from.
    pub houses: NodeHandle,
    pub rows: Vec<NodeHandle>,
    pub body_batch: BatchKey,
    pub roof_batch: BatchKey,
}

impl Town {
    #[must_use]
    pub fn house_count(&self, scene: &Scene) -> usize {
        self.rows
            .iter()
            .filter_map(|&row| scene.get_node(row))
            .map(|row| row.children().len())
            .sum()
    }
}

/// Builds `width` rows of `height` houses centred on the origin.
///
/// Every house gets a `Body` and a `Roof` child drawn through the two instance
/// batches; each child owns one slot and rewrites it whenever its world matrix
/// is recomputed.
pub fn spawn_town(
    scene: &mut Scene,
    instances: &mut InstanceBatches,
    settings: &TownSettings,
) -> Result<Town> {
    let body_batch = instances.create(HOUSE_BODY_MODEL);
    let roof_batch = instances.create(HOUSE_ROOF_MODEL);

    let houses = scene.add_to_root(Node::new("--Houses--").at(Vec3::new(0.0, 2.0, 0.0)));

    let mut rows = Vec::new();
    let mut id = 0;
    for x in -(settings.width / 2)..settings.width / 2 {
        let row = scene.add_child(houses, Node::new(&format!("Rows {}", rows.len())))?;
        rows.push(row);

        for z in -(settings.height / 2)..settings.height / 2 {
            let mut house = Node::new(&format!("House {id}"))
                .at(Vec3::new(
                    settings.separation * x as f32,
                    0.0,
                    settings.separation * z as f32,
                ))
                .scaled(Vec3::splat(2.0));
            if settings.tilt_houses {
                house.randomize_tilt();
            }
            let house_local = house.transform.local_matrix();
            let house = scene.add_child(row, house)?;

            let body = Node::new("Body");
            let roof = Node::new("Roof").at(Vec3::new(0.0, 2.0, 0.0));
            attach_instanced(scene, instances, house, body, body_batch, house_local)?;
            attach_instanced(scene, instances, house, roof, roof_batch, house_local)?;

            id += 1;
        }
    }

    log::info!("Spawned {id} houses in {} rows", rows.len());

    Ok(Town {
        houses,
        rows,
        body_batch,
        roof_batch,
    })
}

/// Reserves a slot for `node`, seeded with its matrix relative to the house,
/// and inserts it under `house`.
fn attach_instanced(
    scene: &mut Scene,
    instances: &mut InstanceBatches,
    house: NodeHandle,
    mut node: Node,
    batch: BatchKey,
    house_local: Mat4,
) -> Result<NodeHandle> {
    let seed = house_local * node.transform.local_matrix();
    node.instance = Some(
        instances
            .allocate(batch, seed)
            .ok_or_else(|| SceneryError::Hierarchy(format!("no instance batch for '{}'", node.label())))?,
    );
    scene.add_child(house, node)
}
