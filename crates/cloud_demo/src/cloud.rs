use cloud_layouter::{
    CenterBiasedScorer, Config, LayoutError, PlacementScorer, Rectangle, Result, Side,
    SideLayouter, Size,
};
use std::sync::Arc;
use strum::IntoEnumIterator;

/// One committed rectangle and the side that proposed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub side: Side,
    pub rect: Rectangle,
}

/// Minimal four-side orchestrator: always grows the emptiest side.
#[derive(Debug)]
pub struct Cloud {
    sides: Vec<SideLayouter>,
    placements: Vec<Placement>,
}

impl Cloud {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let scorer: Arc<dyn PlacementScorer> = Arc::new(CenterBiasedScorer::from(config.scorer));
        let center = config.cloud.center();
        let sides = Side::iter()
            .map(|side| SideLayouter::new(side, center, Arc::clone(&scorer), config.layouter))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            sides,
            placements: Vec::new(),
        })
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn put_next_rectangle(&mut self, size: Size) -> Result<Placement> {
        // first side wins on equal coefficients
        let Some(chosen) = self.sides.iter().min_by(|a, b| {
            a.calculate_coefficient()
                .total_cmp(&b.calculate_coefficient())
        }) else {
            return Err(LayoutError::Config("cloud has no side layouters".to_string()));
        };
        let side = chosen.side();
        let rect = chosen.next_rectangle(size)?;

        for layouter in &mut self.sides {
            layouter.update_weights(&rect)?;
        }

        let placement = Placement { side, rect };
        log::info!(
            "#{} {}x{} -> {} side at {}",
            self.placements.len(),
            size.width,
            size.height,
            side,
            rect
        );
        self.placements.push(placement);
        Ok(placement)
    }
}
