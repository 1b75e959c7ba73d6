//! Physics world wrapping Rapier 3D

use basalt_core::{BasaltError, Result, Vec3};
use rapier3d::prelude::*;

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with standard gravity
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by dt seconds.
    ///
    /// Forces and torques applied since the previous step act for this step
    /// only and are cleared afterwards, so held-input forcing must re-apply
    /// every tick.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// Insert a fixed (immovable) box body
    pub fn insert_static_box(&mut self, position: Vec3, half_extents: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y, position.z])
            .build();
        let handle = self.rigid_body_set.insert(body);
        self.insert_box_collider(handle, half_extents);
        handle
    }

    /// Insert a dynamic box body
    pub fn insert_dynamic_box(&mut self, position: Vec3, half_extents: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .build();
        let handle = self.rigid_body_set.insert(body);
        self.insert_box_collider(handle, half_extents);
        handle
    }

    fn insert_box_collider(&mut self, parent: RigidBodyHandle, half_extents: Vec3) {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .build();
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set);
    }

    /// Apply a force to one body for the next step
    pub fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3) -> Result<()> {
        let body = self
            .rigid_body_set
            .get_mut(handle)
            .ok_or_else(|| BasaltError::PhysicsError(format!("unknown body {handle:?}")))?;
        body.add_force(vector![force.x, force.y, force.z], true);
        Ok(())
    }

    /// Apply a torque to one body for the next step
    pub fn apply_torque(&mut self, handle: RigidBodyHandle, torque: Vec3) -> Result<()> {
        let body = self
            .rigid_body_set
            .get_mut(handle)
            .ok_or_else(|| BasaltError::PhysicsError(format!("unknown body {handle:?}")))?;
        body.add_torque(vector![torque.x, torque.y, torque.z], true);
        Ok(())
    }

    /// Apply a force to every dynamic body for the next step
    pub fn apply_force_all(&mut self, force: Vec3) {
        for (_, body) in self.rigid_body_set.iter_mut() {
            if body.is_dynamic() {
                body.add_force(vector![force.x, force.y, force.z], true);
            }
        }
    }

    /// Apply a torque to every dynamic body for the next step
    pub fn apply_torque_all(&mut self, torque: Vec3) {
        for (_, body) in self.rigid_body_set.iter_mut() {
            if body.is_dynamic() {
                body.add_torque(vector![torque.x, torque.y, torque.z], true);
            }
        }
    }

    /// Current translation of a body
    pub fn body_translation(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let t = body.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }

    /// Current rotation of a body as a quaternion [x, y, z, w]
    pub fn body_rotation(&self, handle: RigidBodyHandle) -> Option<[f32; 4]> {
        self.rigid_body_set
            .get(handle)
            .map(|body| {
                let q = body.rotation();
                [q.i, q.j, q.k, q.w]
            })
    }

    /// Is the body simulated (not fixed)?
    pub fn is_dynamic(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set
            .get(handle)
            .map(|body| body.is_dynamic())
            .unwrap_or(false)
    }

    /// Number of dynamic bodies in the world
    pub fn dynamic_body_count(&self) -> usize {
        self.rigid_body_set
            .iter()
            .filter(|(_, body)| body.is_dynamic())
            .count()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
