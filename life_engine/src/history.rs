use crate::error::HistoryError;
use crate::grid::Grid;
use serde_json::json;
use std::{fs::File, io::BufWriter};
use tracing::info;

pub fn create_history_logger(
    filename: Option<String>,
    width: usize,
    height: usize,
    starting_rle: String,
) -> Box<dyn HistoryLogger> {
    match filename {
        None => Box::new(NoOpHistoryLogger {}),
        Some(filename) => Box::new(JsonHistoryLogger::new(filename, width, height, starting_rle)),
    }
}

/// Records the generations of a simulation so a renderer can replay them.
pub trait HistoryLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_generation(&mut self, generation: usize, grid: &Grid) {}

    #[allow(unused_variables)]
    fn log_finished(&mut self, generations: usize) {}

    fn clear(&mut self) {}

    fn save(&self) -> Result<(), HistoryError> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct Snapshot {
    generation: usize,
    population: usize,
    width: usize,
    height: usize,
    cells: Vec<Vec<u8>>,
}

impl Snapshot {
    fn new(generation: usize, grid: &Grid) -> Snapshot {
        Snapshot {
            generation,
            population: grid.population(),
            width: grid.width(),
            height: grid.height(),
            cells: grid
                .rows()
                .map(|cells| cells.iter().map(|&cell| u8::from(cell)).collect())
                .collect(),
        }
    }
}

struct NoOpHistoryLogger;
impl HistoryLogger for NoOpHistoryLogger {}

struct JsonHistoryLogger {
    filename: String,
    width: usize,
    height: usize,
    starting_rle: String,
    generations: Vec<Snapshot>,
    finished_after: Option<usize>,
}

impl JsonHistoryLogger {
    pub fn new(
        filename: String,
        width: usize,
        height: usize,
        starting_rle: String,
    ) -> JsonHistoryLogger {
        JsonHistoryLogger {
            filename,
            width,
            height,
            starting_rle,
            generations: Vec::new(),
            finished_after: None,
        }
    }
}

impl HistoryLogger for JsonHistoryLogger {
    fn log_generation(&mut self, generation: usize, grid: &Grid) {
        self.generations.push(Snapshot::new(generation, grid));
    }

    fn log_finished(&mut self, generations: usize) {
        self.finished_after = Some(generations);
    }

    fn clear(&mut self) {
        self.generations.clear();
        self.finished_after = None;
    }

    fn save(&self) -> Result<(), HistoryError> {
        let file = File::create(&self.filename)?;

        let data = json!({
            "starting_grid": {
                "width": self.width,
                "height": self.height,
                "rle": self.starting_rle,
            },
            "generations": self.generations,
            "finished_after": self.finished_after,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data)?;
        info!(
            filename = %self.filename,
            generations = self.generations.len(),
            "Saved generation history"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;

    fn history_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("life_engine_{name}_{}.json", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn when_no_filename_is_given_nothing_is_saved() {
        let mut logger = create_history_logger(None, 3, 3, "x = 0, y = 0\n!\n".to_string());
        logger.log_generation(0, &Grid::new(3, 3));

        assert!(logger.save().is_ok());
    }

    #[test]
    fn when_saving_the_history_every_generation_is_written() {
        let path = history_path("saved");
        let grid = Grid::from_picture(".O.\n.O.\n.O.").unwrap();
        let mut logger = create_history_logger(
            Some(path.clone()),
            3,
            3,
            "x = 1, y = 3\no$o$o!\n".to_string(),
        );

        logger.log_generation(0, &grid);
        logger.log_generation(1, &grid.step());
        logger.log_finished(1);
        logger.save().unwrap();

        let data: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(data["starting_grid"]["rle"], "x = 1, y = 3\no$o$o!\n");
        assert_eq!(data["finished_after"], 1);

        let generations = data["generations"].as_array().unwrap();
        assert_eq!(generations.len(), 2);
        assert_eq!(generations[0]["population"], 3);
        assert_eq!(generations[1]["generation"], 1);
        assert_eq!(generations[1]["cells"][1], serde_json::json!([1, 1, 1]));
    }

    #[test]
    fn when_clearing_the_history_previous_generations_are_dropped() {
        let path = history_path("cleared");
        let mut logger =
            create_history_logger(Some(path.clone()), 2, 2, "x = 0, y = 0\n!\n".to_string());

        logger.log_generation(0, &Grid::new(2, 2));
        logger.log_finished(0);
        logger.clear();
        logger.save().unwrap();

        let data: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(data["generations"].as_array().unwrap().is_empty());
        assert!(data["finished_after"].is_null());
    }

    #[test]
    fn when_the_history_file_cannot_be_created_an_error_is_returned() {
        let path = std::env::temp_dir()
            .join("life_engine_missing_directory")
            .join("history.json");
        let logger = create_history_logger(
            Some(path.to_string_lossy().into_owned()),
            1,
            1,
            String::new(),
        );

        assert!(matches!(logger.save(), Err(HistoryError::Io(_))));
    }
}
