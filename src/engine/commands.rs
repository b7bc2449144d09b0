use crate::{
    command::{Command, CommandEffect},
    error::FarmError,
    grid::{Cell, Coord},
    world::World,
};

/// Applies a single player command to the cell under the cursor. Nothing is
/// mutated when an error is returned.
pub(crate) fn apply(world: &mut World, command: &Command) -> Result<CommandEffect, FarmError> {
    let at = world.player.cursor;
    match command {
        Command::MoveCursor(direction) => {
            let cursor = world.grid.step(at, *direction);
            world.player.cursor = cursor;
            Ok(CommandEffect::CursorMoved(cursor))
        }
        Command::SelectCrop(id) => {
            if !world.catalog.contains(id) {
                return Err(FarmError::invalid(format!("unknown crop '{id}'")));
            }
            world.player.selected = id.clone();
            Ok(CommandEffect::CropSelected(id.clone()))
        }
        Command::PerformAction => {
            let cell = world.grid.cell(at);
            if cell.is_empty() {
                plant(world, at)
            } else if cell.is_ripe() {
                harvest(world, at)
            } else {
                Err(FarmError::invalid(format!(
                    "crop at ({}, {}) is still growing",
                    at.col, at.row
                )))
            }
        }
        Command::Plant => plant(world, at),
        Command::Harvest => harvest(world, at),
        Command::Fertilize => fertilize(world, at),
        Command::Quit => Ok(CommandEffect::QuitRequested),
    }
}

fn plant(world: &mut World, at: Coord) -> Result<CommandEffect, FarmError> {
    if !world.grid.cell(at).is_empty() {
        return Err(FarmError::invalid(format!(
            "cell ({}, {}) is already planted",
            at.col, at.row
        )));
    }
    let crop = world
        .catalog
        .get(&world.player.selected)
        .cloned()
        .ok_or_else(|| {
            FarmError::invalid(format!("unknown crop '{}'", world.player.selected))
        })?;
    let now = world.now();
    world.economy.spend(crop.seed_cost)?;
    world.grid.plant(at, &crop, now)?;
    Ok(CommandEffect::Planted {
        at,
        crop: crop.id.clone(),
        cost: crop.seed_cost,
    })
}

fn harvest(world: &mut World, at: Coord) -> Result<CommandEffect, FarmError> {
    if !world.grid.cell(at).is_ripe() {
        return Err(FarmError::invalid(format!(
            "nothing ripe at ({}, {})",
            at.col, at.row
        )));
    }
    let Cell::Occupied(planted) = world.grid.resolve(at) else {
        return Err(FarmError::invalid("harvested cell was empty"));
    };
    let reward = planted.crop.reward;
    world.economy.reward(reward, &planted.crop.id);
    Ok(CommandEffect::Harvested {
        at,
        crop: planted.crop.id.clone(),
        reward,
    })
}

fn fertilize(world: &mut World, at: Coord) -> Result<CommandEffect, FarmError> {
    let cost = world.fertilizer_cost();
    world.economy.ensure_affordable(cost)?;
    if !world.grid.is_fertilizable(at) {
        return Err(FarmError::invalid(format!(
            "cell ({}, {}) has nothing to fertilize",
            at.col, at.row
        )));
    }
    world.economy.spend(cost)?;
    let now = world.now();
    world.grid.fertilize(at, now);
    Ok(CommandEffect::Fertilized { at, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{CropCatalog, CropId},
        grid::Direction,
        world::WorldConfig,
    };

    fn world_with_coins(coins: u32) -> World {
        let config = WorldConfig {
            starting_coins: coins,
            ..WorldConfig::default()
        };
        World::new(CropCatalog::standard(), &config)
    }

    fn ripen(world: &mut World, at: Coord) {
        world.begin_tick(10_000.0);
        world.grid.advance_stage(at, 10_000.0);
        assert!(world.grid.cell(at).is_ripe());
    }

    #[test]
    fn cursor_wraps_and_selection_is_validated() {
        let mut world = world_with_coins(25);
        apply(&mut world, &Command::MoveCursor(Direction::West)).unwrap();
        assert_eq!(world.player.cursor, Coord::new(7, 0));
        apply(&mut world, &Command::MoveCursor(Direction::North)).unwrap();
        assert_eq!(world.player.cursor, Coord::new(7, 5));

        let err = apply(&mut world, &Command::SelectCrop(CropId::from("turnip"))).unwrap_err();
        assert!(matches!(err, FarmError::InvalidAction(_)));
        assert_eq!(world.player.selected.as_str(), "corn");
        apply(&mut world, &Command::SelectCrop(CropId::from("bean"))).unwrap();
        assert_eq!(world.player.selected.as_str(), "bean");
    }

    #[test]
    fn plant_deducts_exact_seed_cost() {
        let mut world = world_with_coins(25);
        let effect = apply(&mut world, &Command::Plant).unwrap();
        assert_eq!(
            effect,
            CommandEffect::Planted {
                at: Coord::ORIGIN,
                crop: CropId::from("corn"),
                cost: 5
            }
        );
        assert_eq!(world.economy.coins(), 20);
        assert!(!world.grid.cell(Coord::ORIGIN).is_empty());
    }

    #[test]
    fn plant_without_funds_changes_nothing() {
        let mut world = world_with_coins(4);
        let err = apply(&mut world, &Command::Plant).unwrap_err();
        assert_eq!(
            err,
            FarmError::InsufficientFunds {
                needed: 5,
                available: 4
            }
        );
        assert_eq!(world.economy.coins(), 4);
        assert!(world.grid.cell(Coord::ORIGIN).is_empty());
    }

    #[test]
    fn plant_on_occupied_cell_keeps_coins() {
        let mut world = world_with_coins(25);
        apply(&mut world, &Command::Plant).unwrap();
        let err = apply(&mut world, &Command::Plant).unwrap_err();
        assert!(matches!(err, FarmError::InvalidAction(_)));
        assert_eq!(world.economy.coins(), 20);
    }

    #[test]
    fn harvest_requires_ripe_crop() {
        let mut world = world_with_coins(25);
        assert!(apply(&mut world, &Command::Harvest).is_err());
        apply(&mut world, &Command::Plant).unwrap();
        assert!(apply(&mut world, &Command::Harvest).is_err());
        assert!(apply(&mut world, &Command::PerformAction).is_err());
        assert_eq!(world.economy.coins(), 20);
        assert!(!world.grid.cell(Coord::ORIGIN).is_empty());
    }

    #[test]
    fn perform_action_harvests_ripe_crop() {
        let mut world = world_with_coins(25);
        apply(&mut world, &Command::PerformAction).unwrap();
        ripen(&mut world, Coord::ORIGIN);
        let effect = apply(&mut world, &Command::PerformAction).unwrap();
        assert_eq!(
            effect,
            CommandEffect::Harvested {
                at: Coord::ORIGIN,
                crop: CropId::from("corn"),
                reward: 12
            }
        );
        assert_eq!(world.economy.coins(), 32);
        assert_eq!(world.economy.harvested(&CropId::from("corn")), 1);
        assert!(world.grid.cell(Coord::ORIGIN).is_empty());
    }

    #[test]
    fn fertilize_charges_once_per_planting() {
        let mut world = world_with_coins(25);
        assert!(matches!(
            apply(&mut world, &Command::Fertilize),
            Err(FarmError::InvalidAction(_))
        ));
        apply(&mut world, &Command::Plant).unwrap();
        apply(&mut world, &Command::Fertilize).unwrap();
        assert_eq!(world.economy.coins(), 15);
        assert!(apply(&mut world, &Command::Fertilize).is_err());
        assert_eq!(world.economy.coins(), 15);
    }

    #[test]
    fn fertilize_without_funds_is_rejected() {
        let mut world = world_with_coins(9);
        apply(&mut world, &Command::Plant).unwrap();
        let err = apply(&mut world, &Command::Fertilize).unwrap_err();
        assert_eq!(
            err,
            FarmError::InsufficientFunds {
                needed: 5,
                available: 4
            }
        );
        assert!(world.grid.is_fertilizable(Coord::ORIGIN));
    }
}
