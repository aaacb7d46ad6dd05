//! Farming domain — tilling, watering, planting, harvest, crop growth.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

pub mod crops;
pub mod harvest;
pub mod rain;
pub mod soil;

/// The state produced by one tool use. `grid` and `ledger` are complete
/// replacements for the inputs, equal to them when nothing applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub grid: FarmGrid,
    pub ledger: PlayerLedger,
    pub outcome: ActionOutcome,
}

/// Apply one tool to one tile.
///
/// Zero energy rejects every tool up front with `Exhausted`. Otherwise a
/// tool either applies (spending its energy cost) or is a silent `NoOp`.
///
/// # Panics
///
/// If `pos` is outside the farm.
pub fn apply_action(
    grid: &FarmGrid,
    ledger: &PlayerLedger,
    clock: &WorldClock,
    tool: Tool,
    seed: CropType,
    pos: GridPos,
) -> ActionResult {
    assert!(
        pos.in_bounds(),
        "tool target {} is outside the {}x{} farm",
        pos,
        GRID_SIZE,
        GRID_SIZE
    );

    if ledger.energy == 0 {
        debug!("[Farming] {:?} at {} refused: too tired", tool, pos);
        return ActionResult {
            grid: grid.clone(),
            ledger: ledger.clone(),
            outcome: ActionOutcome::Exhausted,
        };
    }

    let mut next_grid = grid.clone();
    let mut next_ledger = ledger.clone();
    let tile = next_grid.tile_mut(pos);

    let applied = match tool {
        Tool::Till => soil::till(tile),
        Tool::Water => soil::water(tile),
        Tool::Plant => crops::plant(tile, &mut next_ledger, seed, clock),
        Tool::Harvest => harvest::harvest(tile, &mut next_ledger),
    };

    if !applied {
        debug!("[Farming] {:?} at {} had no effect", tool, pos);
        return ActionResult {
            grid: grid.clone(),
            ledger: ledger.clone(),
            outcome: ActionOutcome::NoOp,
        };
    }

    next_ledger.energy = next_ledger.energy.saturating_sub(tool.energy_cost());

    ActionResult {
        grid: next_grid,
        ledger: next_ledger,
        outcome: ActionOutcome::Applied,
    }
}

impl ToolActionEvent {
    /// A tool use at `pos` with whatever the player has in hand.
    pub fn from_selection(selection: &Selection, pos: GridPos) -> Self {
        Self {
            tool: selection.tool,
            pos,
            seed: selection.seed,
        }
    }
}

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmGrid>()
            .init_resource::<Selection>()
            .add_event::<ToolActionEvent>()
            .add_event::<ActionResolvedEvent>()
            .add_systems(Update, handle_tool_actions);
    }
}

/// Applies each ToolActionEvent in order and reports the outcome.
/// Grid and ledger are only written back when the action applied.
pub fn handle_tool_actions(
    mut tool_events: EventReader<ToolActionEvent>,
    mut grid: ResMut<FarmGrid>,
    mut ledger: ResMut<PlayerLedger>,
    clock: Res<WorldClock>,
    mut resolved_events: EventWriter<ActionResolvedEvent>,
) {
    for event in tool_events.read() {
        let result = apply_action(&grid, &ledger, &clock, event.tool, event.seed, event.pos);

        if result.outcome == ActionOutcome::Applied {
            *grid = result.grid;
            *ledger = result.ledger;
        }

        resolved_events.send(ActionResolvedEvent {
            tool: event.tool,
            pos: event.pos,
            outcome: result.outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        grid: &FarmGrid,
        ledger: &PlayerLedger,
        tool: Tool,
        pos: GridPos,
    ) -> ActionResult {
        apply_action(grid, ledger, &WorldClock::default(), tool, CropType::Parsnip, pos)
    }

    #[test]
    fn test_till_costs_two_energy() {
        let pos = GridPos::new(0, 0);
        let result = run(&FarmGrid::default(), &PlayerLedger::default(), Tool::Till, pos);
        assert_eq!(result.outcome, ActionOutcome::Applied);
        assert!(result.grid.tile(pos).tilled);
        assert_eq!(result.ledger.energy, 98);
    }

    #[test]
    fn test_till_twice_spends_nothing_the_second_time() {
        let pos = GridPos::new(0, 0);
        let first = run(&FarmGrid::default(), &PlayerLedger::default(), Tool::Till, pos);
        let second = run(&first.grid, &first.ledger, Tool::Till, pos);
        assert_eq!(second.outcome, ActionOutcome::NoOp);
        assert_eq!(second.ledger.energy, 98);
        assert_eq!(second.grid, first.grid);
    }

    #[test]
    fn test_full_tool_cycle_energy() {
        let pos = GridPos::new(3, 4);
        let tilled = run(&FarmGrid::default(), &PlayerLedger::default(), Tool::Till, pos);
        let planted = run(&tilled.grid, &tilled.ledger, Tool::Plant, pos);
        assert_eq!(planted.outcome, ActionOutcome::Applied);
        assert_eq!(planted.ledger.energy, 97);
        assert_eq!(planted.ledger.seed_stock[CropType::Parsnip], 14);

        let watered = run(&planted.grid, &planted.ledger, Tool::Water, pos);
        assert_eq!(watered.outcome, ActionOutcome::Applied);
        assert_eq!(watered.ledger.energy, 96);
        assert!(watered.grid.tile(pos).crop.as_ref().unwrap().watered);
    }

    #[test]
    fn test_water_untilled_is_noop() {
        let result = run(
            &FarmGrid::default(),
            &PlayerLedger::default(),
            Tool::Water,
            GridPos::new(1, 1),
        );
        assert_eq!(result.outcome, ActionOutcome::NoOp);
        assert_eq!(result.ledger.energy, 100);
    }

    #[test]
    fn test_harvest_is_free() {
        let pos = GridPos::new(5, 0);
        let mut grid = FarmGrid::default();
        *grid.tile_mut(pos) = Tile {
            tilled: true,
            crop: Some(Crop {
                kind: CropType::Parsnip,
                growth: 4,
                max_growth: 4,
                watered: false,
                planted_on_day: 1,
            }),
        };
        let ledger = PlayerLedger {
            energy: 1,
            ..default()
        };

        let result = run(&grid, &ledger, Tool::Harvest, pos);
        assert_eq!(result.outcome, ActionOutcome::Applied);
        assert_eq!(result.ledger.energy, 1);
        assert_eq!(result.ledger.harvest_inventory[CropType::Parsnip], 1);
        assert!(result.grid.tile(pos).crop.is_none());
        assert!(result.grid.tile(pos).tilled);
    }

    #[test]
    fn test_exhausted_rejects_every_tool() {
        let pos = GridPos::new(0, 0);
        let mut grid = FarmGrid::default();
        grid.tile_mut(pos).tilled = true;
        let ledger = PlayerLedger {
            energy: 0,
            ..default()
        };

        for tool in Tool::ALL {
            let result = run(&grid, &ledger, tool, pos);
            assert_eq!(result.outcome, ActionOutcome::Exhausted, "{:?}", tool);
            assert_eq!(result.grid, grid);
            assert_eq!(result.ledger, ledger);
        }
    }

    #[test]
    fn test_till_with_one_energy_left_floors_at_zero() {
        let ledger = PlayerLedger {
            energy: 1,
            ..default()
        };
        let result = run(&FarmGrid::default(), &ledger, Tool::Till, GridPos::new(0, 0));
        assert_eq!(result.outcome, ActionOutcome::Applied);
        assert_eq!(result.ledger.energy, 0);
    }

    #[test]
    #[should_panic(expected = "outside the 6x6 farm")]
    fn test_out_of_range_target_panics() {
        run(
            &FarmGrid::default(),
            &PlayerLedger::default(),
            Tool::Till,
            GridPos::new(6, 0),
        );
    }

    #[test]
    fn test_event_from_selection() {
        let selection = Selection {
            tool: Tool::Plant,
            seed: CropType::Potato,
        };
        let event = ToolActionEvent::from_selection(&selection, GridPos::new(2, 3));
        assert_eq!(event.tool, Tool::Plant);
        assert_eq!(event.seed, CropType::Potato);
        assert_eq!(event.pos, GridPos::new(2, 3));
    }
}
