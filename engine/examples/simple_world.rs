use signet_engine::ecs::{Component, World};

#[derive(Component, Debug, Clone, Copy)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Component, Debug, Clone, Copy)]
struct Velocity {
    x: i32,
    y: i32,
}

fn main() {
    let mut world = World::new();
    world.register_component::<Position>();
    world.register_component::<Velocity>();

    let mover = world.create_entity();
    world.add_component(mover, Position { x: 0, y: 0 });
    world.add_component(mover, Velocity { x: 1, y: 2 });

    let rock = world.create_entity();
    world.add_component(rock, Position { x: 5, y: 5 });

    for _ in 0..3 {
        for entity in world.query::<(Position, Velocity)>() {
            let velocity = *world.get_component::<Velocity>(entity);
            let position = world.get_component::<Position>(entity);
            position.x += velocity.x;
            position.y += velocity.y;
        }
    }

    for entity in world.query::<Position>() {
        println!(
            "{entity}: {:?} with {} components",
            world.get_component_ref::<Position>(entity),
            world.signature(entity).len()
        );
    }

    world.destroy_entity(mover);
    println!("after destroy: {:?}", world.query::<Position>());
}
