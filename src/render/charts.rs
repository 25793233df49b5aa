//! Four-panel analytics screen
//!
//! Score and survival-time trends over the player's recent games, their
//! movement efficiency, and the global top scores.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::metrics::AnalyticsReport;

pub struct ChartsView;

impl ChartsView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, report: &AnalyticsReport) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let title = Paragraph::new(Line::from(Span::styled(
            format!("Game Analytics for {}", report.player_name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        let top = halves(rows[1]);
        let bottom = halves(rows[2]);

        self.render_trend(
            frame,
            top[0],
            &report.score_series(),
            report.max_score(),
            TrendPanel {
                title: " Score Progression (Last 10 Games) ",
                y_title: "Score",
                color: Color::Blue,
                marker: symbols::Marker::Dot,
            },
        );
        self.render_trend(
            frame,
            top[1],
            &report.survival_series(),
            report.max_survival(),
            TrendPanel {
                title: " Survival Time (Last 10 Games) ",
                y_title: "Seconds",
                color: Color::Green,
                marker: symbols::Marker::Block,
            },
        );
        self.render_efficiency(frame, bottom[0], report);
        self.render_leaderboard(frame, bottom[1], report);

        let hint = Paragraph::new(Line::from(Span::styled(
            "Press any key to return",
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, rows[3]);
    }

    fn render_trend(
        &self,
        frame: &mut Frame,
        area: Rect,
        points: &[(f64, f64)],
        max_y: f64,
        panel: TrendPanel,
    ) {
        let max_x = (points.len().saturating_sub(1)).max(1) as f64;
        let max_y = if max_y > 0.0 { max_y * 1.1 } else { 1.0 };

        let dataset = Dataset::default()
            .marker(panel.marker)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(panel.color))
            .data(points);

        let chart = Chart::new(vec![dataset])
            .block(Block::default().borders(Borders::ALL).title(panel.title))
            .x_axis(
                Axis::default()
                    .title("Game Number")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, max_x])
                    .labels(vec!["1".to_string(), format!("{}", points.len())]),
            )
            .y_axis(
                Axis::default()
                    .title(panel.y_title)
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, max_y])
                    .labels(vec!["0".to_string(), format!("{:.0}", max_y)]),
            );

        frame.render_widget(chart, area);
    }

    fn render_efficiency(&self, frame: &mut Frame, area: Rect, report: &AnalyticsReport) {
        let bars: Vec<Bar> = report
            .efficiencies()
            .into_iter()
            .enumerate()
            .map(|(i, efficiency)| {
                Bar::default()
                    .value(efficiency.round().max(0.0) as u64)
                    .text_value(format!("{:.0}", efficiency))
                    .label(Line::from(format!("{}", i + 1)))
                    .style(Style::default().fg(Color::Rgb(255, 165, 0)))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Movement Efficiency (%) "),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(3)
            .bar_gap(1)
            .max(100);

        frame.render_widget(chart, area);
    }

    fn render_leaderboard(&self, frame: &mut Frame, area: Rect, report: &AnalyticsReport) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Top 5 High Scores ");

        if report.leaders.is_empty() {
            frame.render_widget(Paragraph::new("No scores yet").block(block), area);
            return;
        }

        let bars: Vec<Bar> = report
            .leaders
            .iter()
            .map(|leader| {
                Bar::default()
                    .value(u64::from(leader.score))
                    .text_value(leader.score.to_string())
                    .label(Line::from(leader.player_name.clone()))
                    .style(Style::default().fg(Color::Red))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(0);

        frame.render_widget(chart, area);
    }
}

impl Default for ChartsView {
    fn default() -> Self {
        Self::new()
    }
}

struct TrendPanel {
    title: &'static str,
    y_title: &'static str,
    color: Color,
    marker: symbols::Marker,
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}
