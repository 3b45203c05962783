use ratatui::layout::Rect;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub form: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn layout_regions(area: Rect) -> Regions {
    let header_height = area.height.min(3);
    let form_height = 4.min(area.height.saturating_sub(header_height));
    let footer_height = 3.min(area.height.saturating_sub(header_height + form_height));
    let body_height = area
        .height
        .saturating_sub(header_height + form_height + footer_height);

    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let form = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: form_height,
    };
    let body = Rect {
        x: area.x,
        y: form.y + form_height,
        width: area.width,
        height: body_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    Regions {
        header,
        form,
        body,
        footer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let regions = layout_regions(Rect::new(0, 0, 80, 24));
        assert_eq!(regions.header, Rect::new(0, 0, 80, 3));
        assert_eq!(regions.form, Rect::new(0, 3, 80, 4));
        assert_eq!(regions.body, Rect::new(0, 7, 80, 14));
        assert_eq!(regions.footer, Rect::new(0, 21, 80, 3));
    }

    #[test]
    fn tiny_terminal_degrades() {
        let regions = layout_regions(Rect::new(0, 0, 20, 5));
        assert_eq!(regions.header.height, 3);
        assert_eq!(regions.form.height, 2);
        assert_eq!(regions.body.height, 0);
        assert_eq!(regions.footer.height, 0);
    }
}
