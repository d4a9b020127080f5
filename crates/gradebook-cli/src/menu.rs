//! Line-oriented interactive menu over a [`Registry`].
//!
//! Reads one answer per line and prints results or `Error: <message>`. Failures
//! never end the session; end of input or option 9 does.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use gradebook_core::{Registry, User};

const MENU: &str = "
Menu
1. Register professor
2. Register student
3. Create course
4. Enroll student in course
5. Create evaluation
6. Record score
7. Show student average
8. Low-performer report
9. Quit
10. List professors
11. List courses";

/// Interactive session state.
pub struct Menu<R, W> {
    input: R,
    output: W,
    registry: Registry,
    default_weight: f64,
    default_threshold: f64,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, registry: Registry) -> Self {
        Self {
            input,
            output,
            registry,
            default_weight: gradebook_core::DEFAULT_WEIGHT,
            default_threshold: 60.0,
        }
    }

    /// Values used when the weight or threshold prompt is left blank.
    pub fn with_defaults(mut self, weight: f64, threshold: f64) -> Self {
        self.default_weight = weight;
        self.default_threshold = threshold;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "Choose an option: ")?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else {
                break;
            };

            let outcome = match choice.trim() {
                "1" => self.register_professor(),
                "2" => self.register_student(),
                "3" => self.create_course(),
                "4" => self.enroll_student(),
                "5" => self.create_evaluation(),
                "6" => self.record_score(),
                "7" => self.show_average(),
                "8" => self.low_performer_report(),
                "9" => break,
                "10" => self.list_professors(),
                "11" => self.list_courses(),
                _ => {
                    writeln!(self.output, "Invalid option.")?;
                    continue;
                }
            };

            if let Err(e) = outcome {
                tracing::debug!("menu action failed: {e:#}");
                writeln!(self.output, "Error: {e:#}")?;
            }
        }

        writeln!(self.output)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        self.read_line()?
            .ok_or_else(|| anyhow::anyhow!("unexpected end of input"))
    }

    fn prompt_f64(&mut self, label: &str, default: Option<f64>) -> Result<f64> {
        let raw = self.prompt(label)?;
        let raw = raw.trim();
        match default {
            Some(value) if raw.is_empty() => Ok(value),
            _ => raw
                .parse()
                .with_context(|| format!("invalid number: {raw:?}")),
        }
    }

    fn register_professor(&mut self) -> Result<()> {
        let id = self.prompt("Professor ID")?;
        let name = self.prompt("Name")?;
        let email = self.prompt("Email")?;
        let department = self.prompt("Department")?;
        self.registry
            .register_user(User::professor(id, name, email, department))?;
        writeln!(self.output, "Professor registered.")?;
        Ok(())
    }

    fn register_student(&mut self) -> Result<()> {
        let id = self.prompt("Student ID")?;
        let name = self.prompt("Name")?;
        let email = self.prompt("Email")?;
        let student_number = self.prompt("Student number")?;
        self.registry
            .register_user(User::student(id, name, email, student_number))?;
        writeln!(self.output, "Student registered.")?;
        Ok(())
    }

    fn create_course(&mut self) -> Result<()> {
        let name = self.prompt("Course name")?;
        let code = self.prompt("Course code")?;
        let professor_id = self.prompt("Professor ID")?;
        self.registry.create_course(&name, &code, &professor_id)?;
        writeln!(self.output, "Course created.")?;
        Ok(())
    }

    fn enroll_student(&mut self) -> Result<()> {
        let code = self.prompt("Course code")?;
        let student_id = self.prompt("Student ID")?;
        self.registry.enroll_student(&code, &student_id)?;
        writeln!(self.output, "Student enrolled.")?;
        Ok(())
    }

    fn create_evaluation(&mut self) -> Result<()> {
        let code = self.prompt("Course code")?;
        let kind = self.prompt("Kind (exam/assignment)")?;
        let title = self.prompt("Title")?;
        let max_score = self.prompt_f64("Max score", None)?;
        let weight = self.prompt_f64("Weight", Some(self.default_weight))?;
        let id = self
            .registry
            .create_evaluation(&code, &kind, &title, max_score, weight)?
            .id();
        writeln!(self.output, "Evaluation created with ID {id}")?;
        Ok(())
    }

    fn record_score(&mut self) -> Result<()> {
        let code = self.prompt("Course code")?;
        let raw_id = self.prompt("Evaluation ID")?;
        let evaluation_id: u64 = raw_id
            .trim()
            .parse()
            .with_context(|| format!("invalid evaluation ID: {raw_id:?}"))?;
        let student_id = self.prompt("Student ID")?;
        let score = self.prompt_f64("Score", None)?;
        self.registry
            .record_score(&code, evaluation_id, &student_id, score)?;
        writeln!(self.output, "Score recorded.")?;
        Ok(())
    }

    fn show_average(&mut self) -> Result<()> {
        let code = self.prompt("Course code")?;
        let student_id = self.prompt("Student ID")?;
        match self.registry.student_average(&code, &student_id)? {
            Some(avg) => writeln!(self.output, "Average: {avg:.2}%")?,
            None => writeln!(self.output, "No grades recorded.")?,
        }
        Ok(())
    }

    fn low_performer_report(&mut self) -> Result<()> {
        let code = self.prompt("Course code")?;
        let threshold = self.prompt_f64("Threshold (%)", Some(self.default_threshold))?;
        let below = self.registry.low_performers(&code, threshold)?;
        if below.is_empty() {
            writeln!(self.output, "No students below the threshold.")?;
        }
        for lp in &below {
            writeln!(
                self.output,
                "ID: {}, Name: {}, Average: {:.2}%",
                lp.id, lp.name, lp.average
            )?;
        }
        Ok(())
    }

    fn list_professors(&mut self) -> Result<()> {
        let professors = self.registry.list_professors();
        if professors.is_empty() {
            writeln!(self.output, "No professors registered.")?;
        }
        for p in professors {
            let department = p
                .as_professor()
                .map(|prof| prof.department.as_str())
                .unwrap_or_default();
            writeln!(
                self.output,
                "ID: {}, Name: {}, Email: {}, Department: {}",
                p.id, p.name, p.email, department
            )?;
        }
        Ok(())
    }

    fn list_courses(&mut self) -> Result<()> {
        let courses = self.registry.list_courses();
        if courses.is_empty() {
            writeln!(self.output, "No courses registered.")?;
        }
        for c in courses {
            let professor = self
                .registry
                .professor_of(c)
                .map(|p| p.name.as_str())
                .unwrap_or_default();
            writeln!(
                self.output,
                "Code: {}, Name: {}, Professor: {}",
                c.code(),
                c.name(),
                professor
            )?;
        }
        Ok(())
    }
}
