#[cfg(test)]
mod tests {
    use atende::db::atendimentos::Atendimentos;
    use atende::libs::atendimento::{Atendimento, DocumentoKind, Modalidade};
    use atende::libs::export::{ExportFormat, Exporter};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ExportTestContext { temp_dir }
        }
    }

    fn seed_one(atendimentos: &Atendimentos) -> i64 {
        let at = Atendimento::new(
            "Alpha Ltda",
            "Maria Silva",
            Modalidade::Admissional,
            NaiveDate::from_ymd_opt(2025, 9, 4).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        );
        atendimentos.insert(&at).unwrap()
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let atendimentos = Atendimentos::new().unwrap();
        let id = seed_one(&atendimentos);
        atendimentos.set_documento(id, DocumentoKind::Laudo, "laudo.pdf").unwrap();
        let all = atendimentos.fetch(&Default::default()).unwrap();

        let output_path = ctx.temp_dir.path().join("test_export.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(output_path.clone()));
        exporter.export(&all).unwrap();

        assert!(output_path.exists());
        let content = std::fs::read_to_string(&output_path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("ID,Empresa,Nome,Modalidade,Data,Hora"));
        let row = lines.next().unwrap();
        assert!(row.contains("Alpha Ltda"));
        assert!(row.contains("Maria Silva"));
        // Boundary formatting in the export, not the ISO storage form
        assert!(row.contains("04/09/2025"));
        assert!(row.contains("laudo.pdf"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let atendimentos = Atendimentos::new().unwrap();
        seed_one(&atendimentos);
        let all = atendimentos.fetch(&Default::default()).unwrap();

        let output_path = ctx.temp_dir.path().join("test_export.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(output_path.clone()));
        exporter.export(&all).unwrap();

        assert!(output_path.exists());
        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["empresa"], "Alpha Ltda");
        assert_eq!(rows[0]["data"], "04/09/2025");
        assert_eq!(rows[0]["hora"], "09:00");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_excel(ctx: &mut ExportTestContext) {
        let atendimentos = Atendimentos::new().unwrap();
        seed_one(&atendimentos);
        let all = atendimentos.fetch(&Default::default()).unwrap();

        let output_path = ctx.temp_dir.path().join("test_export.xlsx");
        let exporter = Exporter::new(ExportFormat::Excel, Some(output_path.clone()));
        exporter.export(&all).unwrap();

        assert!(output_path.exists());
        assert!(output_path.metadata().unwrap().len() > 0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_empty_table_writes_nothing(ctx: &mut ExportTestContext) {
        let atendimentos = Atendimentos::new().unwrap();
        let all = atendimentos.fetch(&Default::default()).unwrap();

        let output_path = ctx.temp_dir.path().join("empty.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(output_path.clone()));
        exporter.export(&all).unwrap();

        assert!(!output_path.exists());
    }

    #[test]
    fn test_default_output_name() {
        let exporter = Exporter::new(ExportFormat::Excel, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("atende_export_"));
        assert!(name.ends_with(".xlsx"));
    }
}
